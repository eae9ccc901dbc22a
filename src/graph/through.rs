use crate::graph::node::{GraphNode, RenderCtx};

/// Serial chain: render the source into the buffer, then let the effect
/// process it in place. The building block for source -> filter -> gain.
pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn fade_in(&mut self, ctx: &RenderCtx) {
        self.source.fade_in(ctx);
        self.filter.fade_in(ctx);
    }

    fn fade_out(&mut self, ctx: &RenderCtx) {
        self.source.fade_out(ctx);
        self.filter.fade_out(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn envelope_level(&self) -> Option<f32> {
        self.source.envelope_level()
    }
}
