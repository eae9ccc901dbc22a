use crate::{graph::node::RenderCtx, MASTER_SMOOTHING_SECS};

/// Shared volume stage downstream of every channel.
///
/// Volume changes are applied as an exponential approach to the target with
/// a 0.1 s time constant rather than an instantaneous jump, so the mix never
/// clicks. Out-of-range targets are saturated, not rejected.
pub struct MasterBus {
    target: f32,
    current: f32,
}

impl MasterBus {
    pub fn new(initial_volume: f32) -> Self {
        let volume = initial_volume.clamp(0.0, 1.0);
        Self {
            target: volume,
            current: volume,
        }
    }

    /// Retarget the bus. Values outside [0, 1] are clamped.
    pub fn set_volume(&mut self, volume: f32) {
        self.target = volume.clamp(0.0, 1.0);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Scale the mixed block in place, easing toward the target per sample.
    pub fn process(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let coeff = 1.0 - (-1.0 / (MASTER_SMOOTHING_SECS * ctx.sample_rate)).exp();
        for sample in out.iter_mut() {
            self.current += (self.target - self.current) * coeff;
            *sample *= self.current;
        }
    }
}
