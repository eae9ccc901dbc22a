//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to embed directly inside channel structs. They
//! intentionally stay focused on the signal math so graph combinators can
//! layer on orchestration and lifecycle handling.

/// Linear attack/release gate for channel fades.
pub mod fade;
/// One-pole lowpass used to darken brown-noise channels.
pub mod filter;
/// Colored-noise buffer synthesis.
pub mod noise;

pub use fade::FadeStage;
pub use noise::{NoiseBuffer, NoiseKind, NoiseSynth, SynthesisError};
