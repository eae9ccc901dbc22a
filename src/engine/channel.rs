use crate::{
    dsp::noise::{NoiseBuffer, NoiseKind},
    graph::{
        extensions::NodeExt,
        fade::FadeNode,
        filter::FilterNode,
        looper::LoopSource,
        node::{GraphNode, RenderCtx},
    },
    ATTACK_SECS, BROWN_LOWPASS_HZ, RELEASE_SECS,
};

/// Lifecycle of one playback channel. Absence from the mixer is the
/// implicit idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Starting, // Fading in
    Playing,  // Looping at full fade level
    Stopping, // Fading out, retired when the release completes
}

/// State change observed while rendering a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChannelTransition {
    None,
    ReachedFull,
    Finished,
}

/// One active or transitioning playback unit.
///
/// Owns its buffer and graph nodes exclusively; everything is dropped
/// together when the mixer retires the channel.
pub struct Channel {
    token: u64,
    kind: NoiseKind,
    state: ChannelState,
    finished: bool,
    graph: Box<dyn GraphNode>,
}

impl Channel {
    /// Build the playback graph and begin fading in.
    ///
    /// Chain: source -> shaping lowpass (brown only) -> fade gain. The
    /// mixer's master bus sits downstream of every channel.
    pub(crate) fn start(token: u64, kind: NoiseKind, buffer: NoiseBuffer, ctx: &RenderCtx) -> Self {
        let kind = kind.resolve();
        let fade = FadeNode::new(ATTACK_SECS, RELEASE_SECS);

        let mut graph: Box<dyn GraphNode> = match kind {
            NoiseKind::Brown => Box::new(
                LoopSource::new(buffer)
                    .through(FilterNode::lowpass(BROWN_LOWPASS_HZ))
                    .amplify(fade),
            ),
            _ => Box::new(LoopSource::new(buffer).amplify(fade)),
        };
        graph.fade_in(ctx);

        Self {
            token,
            kind,
            state: ChannelState::Starting,
            finished: false,
            graph,
        }
    }

    /// Begin fading out from the current gain, cancelling an in-flight
    /// attack. Idempotent: releasing a stopping channel is a no-op.
    pub(crate) fn release(&mut self, ctx: &RenderCtx) {
        if self.state == ChannelState::Stopping {
            return;
        }
        self.state = ChannelState::Stopping;
        self.graph.fade_out(ctx);
    }

    /// Render one block and report any state transition.
    pub(crate) fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) -> ChannelTransition {
        self.graph.render_block(out, ctx);

        match self.state {
            ChannelState::Starting if self.level() >= 1.0 => {
                self.state = ChannelState::Playing;
                ChannelTransition::ReachedFull
            }
            ChannelState::Stopping if !self.graph.is_active() => {
                self.finished = true;
                ChannelTransition::Finished
            }
            _ => ChannelTransition::None,
        }
    }

    fn level(&self) -> f32 {
        self.graph.envelope_level().unwrap_or(0.0)
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }
}
