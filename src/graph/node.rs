/// Context passed to graph nodes during rendering.
///
/// Ambient channels have no pitch or velocity; the only thing a node needs
/// from its host is the output sample rate.
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for audio processing graph nodes.
///
/// Nodes render audio in blocks and respond to channel lifecycle events.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Triggered when the owning channel starts.
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn fade_in(&mut self, _ctx: &RenderCtx) {
        // Default: do nothing
    }

    /// Triggered when the owning channel is asked to stop.
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn fade_out(&mut self, _ctx: &RenderCtx) {
        // Default: do nothing
    }

    /// Current fade gain, if this node (or a descendant) carries one.
    fn envelope_level(&self) -> Option<f32> {
        None
    }

    /// Check if this node is still producing sound.
    ///
    /// Used by the mixer to know when a channel can be retired.
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn fade_in(&mut self, ctx: &RenderCtx) {
        (**self).fade_in(ctx)
    }

    fn fade_out(&mut self, ctx: &RenderCtx) {
        (**self).fade_out(ctx)
    }

    fn envelope_level(&self) -> Option<f32> {
        (**self).envelope_level()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
