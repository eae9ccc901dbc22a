use crate::{
    dsp::noise::NoiseBuffer,
    graph::node::{GraphNode, RenderCtx},
};

/// Looping playback of a synthesized buffer.
///
/// Wraps seamlessly at the buffer boundary. Synthesized noise is not
/// guaranteed to start and end at equal amplitude, so an audible seam every
/// loop is possible; for five-second noise beds it is accepted rather than
/// crossfaded away.
pub struct LoopSource {
    buffer: NoiseBuffer,
    position: usize,
}

impl LoopSource {
    pub fn new(buffer: NoiseBuffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn buffer(&self) -> &NoiseBuffer {
        &self.buffer
    }
}

impl GraphNode for LoopSource {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let samples = self.buffer.samples();
        if samples.is_empty() {
            out.fill(0.0);
            return;
        }

        for sample in out.iter_mut() {
            *sample = samples[self.position];
            self.position += 1;
            if self.position == samples.len() {
                self.position = 0;
            }
        }
    }
}
