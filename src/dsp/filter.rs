use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/// Single-pole lowpass.
///
/// `y += a * (x - y)` with `a = 1 - exp(-tau * fc / sr)`. A 6 dB/octave
/// slope is all the brown channels need to lose their gritty top end; the
/// gentle knee keeps the rumble natural.
pub struct OnePole {
    z1: f32, // Filter memory
    pub cutoff_hz: f32,
}

impl OnePole {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            z1: 0.0,
            cutoff_hz,
        }
    }

    #[inline]
    fn compute_a(&self, ctx: &RenderCtx) -> f32 {
        1.0 - (-TAU * self.cutoff_hz / ctx.sample_rate).exp()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, a: f32) -> f32 {
        self.z1 += a * (sample - self.z1);
        self.z1
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let a = self.compute_a(ctx);
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, a);
        }
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
    }
}
