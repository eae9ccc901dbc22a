pub mod catalog;
pub mod dsp;
pub mod engine; // Channel lifecycle, mixing, and the public facade
pub mod graph; // Composable audio graph nodes
pub mod io;

pub use engine::{AudioEngine, EngineConfig, EngineError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Length of every synthesized loop buffer, in seconds.
pub const BUFFER_SECS: f32 = 5.0;
/// Fade-in ramp length when a channel starts.
pub const ATTACK_SECS: f32 = 1.0;
/// Fade-out ramp length when a channel stops.
pub const RELEASE_SECS: f32 = 0.5;
/// Cutoff of the shaping lowpass applied to brown-noise channels.
pub const BROWN_LOWPASS_HZ: f32 = 400.0;
/// Time constant of the master volume smoother.
pub const MASTER_SMOOTHING_SECS: f32 = 0.1;
