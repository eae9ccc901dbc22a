use crate::{
    dsp::filter::OnePole,
    graph::node::{GraphNode, RenderCtx},
};

/// Lowpass shaping node wrapping the one-pole primitive.
pub struct FilterNode {
    filter: OnePole,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: OnePole::lowpass(cutoff_hz),
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }
}
