use crate::{
    dsp::fade::Fade,
    graph::node::{GraphNode, RenderCtx},
};

/// Fade envelope exposed as a gain-curve node.
///
/// Renders the fade's level curve; amplify a source with it to gate the
/// channel. Lifecycle events map straight onto the underlying `Fade`.
pub struct FadeNode {
    fade: Fade,
}

impl FadeNode {
    pub fn new(attack_time: f32, release_time: f32) -> Self {
        Self {
            fade: Fade::new(attack_time, release_time),
        }
    }

    pub fn is_full(&self) -> bool {
        self.fade.is_full()
    }
}

impl GraphNode for FadeNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.fade.render(out, ctx);
    }

    fn fade_in(&mut self, _ctx: &RenderCtx) {
        self.fade.fade_in();
    }

    fn fade_out(&mut self, ctx: &RenderCtx) {
        self.fade.fade_out(ctx);
    }

    fn envelope_level(&self) -> Option<f32> {
        Some(self.fade.level())
    }

    fn is_active(&self) -> bool {
        self.fade.is_active()
    }
}
