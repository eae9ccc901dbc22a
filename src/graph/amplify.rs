use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, used here to gate a looping source with
/// its fade curve.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        // Render signal into output
        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        // Multiply signal by modulator (amplitude control)
        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn fade_in(&mut self, ctx: &RenderCtx) {
        self.signal.fade_in(ctx);
        self.modulator.fade_in(ctx);
    }

    fn fade_out(&mut self, ctx: &RenderCtx) {
        self.signal.fade_out(ctx);
        self.modulator.fade_out(ctx);
    }

    fn envelope_level(&self) -> Option<f32> {
        self.modulator
            .envelope_level()
            .or_else(|| self.signal.envelope_level())
    }

    fn is_active(&self) -> bool {
        // A closed gate silences the whole chain
        self.signal.is_active() && self.modulator.is_active()
    }
}
