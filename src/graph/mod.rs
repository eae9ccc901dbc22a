//! Composable building blocks for constructing playback graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics a
//! channel needs: fade lifecycle events and block-based rendering. The
//! `extensions` module adds fluent helpers so a channel's chain can be
//! authored with a clear, chainable API.

/// Multiply a signal by a gain curve (the channel fade).
pub mod amplify;
/// Fluent combinators (`.amplify()`, `.through()`).
pub mod extensions;
/// Fade envelope exposed as a gain-curve node.
pub mod fade;
/// Lowpass shaping node for brown channels.
pub mod filter;
/// Looping playback of a synthesized buffer.
pub mod looper;
/// Core traits shared by all graph nodes.
pub mod node;
/// Serial chaining of two nodes (source -> effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
