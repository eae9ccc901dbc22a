//! Channel lifecycle, mixing, and the `AudioEngine` facade.
//!
//! The engine is split into two cooperating halves joined by bounded SPSC
//! rings: the facade (control side) validates requests, synthesizes buffers,
//! and keeps the id-keyed registry; the mixer (audio side) owns the live
//! channels and runs inside the output callback. Neither half blocks on the
//! other.

pub mod channel;
pub mod command;
pub mod master;
pub mod mixer;
pub mod registry;

use std::sync::{Arc, Mutex};

use rtrb::RingBuffer;

use crate::{
    dsp::noise::{NoiseKind, NoiseSynth, SynthesisError},
    engine::{
        command::{EngineCommand, COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE},
        registry::{Begin, StopAction},
    },
    io::output::{ContextState, OutputContext, OutputError},
    BUFFER_SECS,
};

pub use channel::{Channel, ChannelState};
pub use command::ChannelEvent;
pub use master::MasterBus;
pub use mixer::Mixer;
pub use registry::{ChannelPhase, ChannelRegistry};

/// Engine-init parameters. The sample rate is fixed for the engine's
/// lifetime; every synthesized buffer uses it.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub sample_rate: u32,
    pub volume: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            volume: 0.5,
        }
    }
}

/// Failures surfaced by `play`. Every other operation degrades to a no-op
/// rather than erroring.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The platform audio output could not be created.
    #[error("audio output context unavailable")]
    ContextUnavailable(#[source] OutputError),

    /// The output exists but is suspended and refused to resume.
    #[error("audio output suspended and could not be resumed")]
    ResumeDenied(#[source] OutputError),

    /// Synthesis precondition violation.
    #[error(transparent)]
    InvalidSynthesis(#[from] SynthesisError),

    /// The control ring is saturated; the request was rolled back.
    #[error("engine command queue is full")]
    CommandQueueFull,
}

/// The ambient-noise engine facade, the only component collaborators see.
///
/// Construct one at process start and pass it by reference to every
/// collaborator; there is no global instance. The platform output context
/// is created lazily on the first `play` so construction itself has no
/// platform side effects.
pub struct AudioEngine {
    config: EngineConfig,
    volume: f32,
    registry: ChannelRegistry,
    synth: NoiseSynth,
    commands: rtrb::Producer<EngineCommand>,
    events: rtrb::Consumer<ChannelEvent>,
    output: OutputContext,
    // Handed to the output stream on first play; `None` once running and
    // for offline engines, which return the mixer to the caller instead.
    mixer: Option<Arc<Mutex<Mixer>>>,
}

impl AudioEngine {
    pub fn new(config: EngineConfig) -> Self {
        let (mut engine, mixer) = Self::with_output(config, OutputContext::uninitialized());
        engine.mixer = Some(Arc::new(Mutex::new(mixer)));
        engine
    }

    /// Headless pair for offline rendering and tests: no platform context
    /// is ever created, and the caller drives `Mixer::render_block`.
    pub fn offline(config: EngineConfig) -> (Self, Mixer) {
        Self::with_output(config, OutputContext::offline())
    }

    fn with_output(config: EngineConfig, output: OutputContext) -> (Self, Mixer) {
        let (commands_tx, commands_rx) = RingBuffer::new(COMMAND_QUEUE_SIZE);
        let (events_tx, events_rx) = RingBuffer::new(EVENT_QUEUE_SIZE);

        let volume = config.volume.clamp(0.0, 1.0);
        let mixer = Mixer::new(config.sample_rate as f32, volume, commands_rx, events_tx);

        let engine = Self {
            config,
            volume,
            registry: ChannelRegistry::new(),
            synth: NoiseSynth::new(),
            commands: commands_tx,
            events: events_rx,
            output,
            mixer: None,
        };
        (engine, mixer)
    }

    /// Start a channel, or no-op when `id` is already active.
    ///
    /// The first call creates the output context; later calls resume it if
    /// the platform suspended it. A play against a stopping id is queued and
    /// issued once the old channel has fully torn down.
    pub fn play(&mut self, id: &str, kind: NoiseKind) -> Result<(), EngineError> {
        self.poll();
        self.begin_and_start(id, kind)
    }

    /// Occupy a slot for a recorder-owned clip played outside the mixer.
    /// Returns false when the id is already taken. Counts toward
    /// active-channel accounting only; nothing is synthesized or mixed.
    pub fn attach_clip(&mut self, id: &str) -> bool {
        self.poll();
        let attached = self.registry.begin_external(id);
        if attached {
            tracing::debug!(id, "external clip attached");
        }
        attached
    }

    /// Fade out and tear down the channel for `id`. No-op when absent.
    pub fn stop(&mut self, id: &str) {
        self.poll();
        match self.registry.request_stop(id) {
            StopAction::Ignore => {}
            StopAction::ClearExternal => {
                tracing::debug!(id, "external clip detached");
            }
            StopAction::Stop(token) => {
                if self.commands.push(EngineCommand::Stop { token }).is_ok() {
                    self.registry.confirm_stopping(id);
                    tracing::debug!(id, "channel stopping");
                } else {
                    tracing::warn!(id, "command queue full, stop not delivered");
                }
            }
        }
    }

    /// Stop every registered channel. Per-channel, unordered.
    pub fn stop_all(&mut self) {
        self.poll();
        if self.registry.is_empty() {
            return;
        }
        if self.commands.push(EngineCommand::StopAll).is_ok() {
            self.registry.mark_all_stopping();
            tracing::debug!("all channels stopping");
        } else {
            tracing::warn!("command queue full, stop-all not delivered");
        }
    }

    /// Retarget the master volume. Values outside [0, 1] are clamped; the
    /// bus eases to the new target instead of jumping.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if self
            .commands
            .push(EngineCommand::SetVolume(self.volume))
            .is_err()
        {
            tracing::warn!("command queue full, volume change not delivered");
        }
    }

    /// Pause the output context (platform backgrounding). The next `play`
    /// attempts to resume and reports `ResumeDenied` if the platform
    /// refuses.
    pub fn suspend(&mut self) -> Result<(), EngineError> {
        self.output.pause().map_err(EngineError::ContextUnavailable)
    }

    /// Drain lifecycle events from the mixer: promote channels whose attack
    /// completed, release slots whose teardown finished, and issue queued
    /// restarts. Presentation layers should call this once per frame; the
    /// mutating operations above call it implicitly.
    pub fn poll(&mut self) {
        while let Ok(event) = self.events.pop() {
            if let Some(pending) = self.registry.apply(event) {
                if let Err(err) = self.begin_and_start(&pending.id, pending.kind) {
                    tracing::warn!(id = %pending.id, %err, "queued restart failed");
                }
            }
        }
    }

    fn begin_and_start(&mut self, id: &str, kind: NoiseKind) -> Result<(), EngineError> {
        match self.registry.begin(id, kind) {
            Begin::Occupied | Begin::Queued => Ok(()),
            Begin::Fresh(token) => self.start_channel(token, id, kind),
        }
    }

    fn start_channel(&mut self, token: u64, id: &str, kind: NoiseKind) -> Result<(), EngineError> {
        if let Err(err) = self.ensure_ready() {
            self.registry.abort(id);
            return Err(err);
        }

        // A fresh buffer per play call, never cached or shared.
        let buffer = match self
            .synth
            .generate(kind.resolve(), BUFFER_SECS, self.config.sample_rate)
        {
            Ok(buffer) => buffer,
            Err(err) => {
                self.registry.abort(id);
                return Err(err.into());
            }
        };

        let command = EngineCommand::Play {
            token,
            kind: kind.resolve(),
            buffer,
        };
        if self.commands.push(command).is_err() {
            self.registry.abort(id);
            return Err(EngineError::CommandQueueFull);
        }
        tracing::debug!(id, kind = %kind.resolve(), "channel starting");
        Ok(())
    }

    /// Two-phase context lifecycle: create on first use, resume when the
    /// platform suspended it, pass through when ready.
    fn ensure_ready(&mut self) -> Result<(), EngineError> {
        match self.output.state() {
            ContextState::Running | ContextState::Offline => Ok(()),
            ContextState::Suspended => self.output.resume().map_err(EngineError::ResumeDenied),
            ContextState::Uninitialized => {
                let Some(mixer) = self.mixer.clone() else {
                    return Err(EngineError::ContextUnavailable(OutputError::NotStarted));
                };
                self.output
                    .start(mixer, self.config.sample_rate)
                    .map_err(|err| {
                        if matches!(err, OutputError::PlayStream(_)) {
                            EngineError::ResumeDenied(err)
                        } else {
                            EngineError::ContextUnavailable(err)
                        }
                    })?;
                self.mixer = None;
                tracing::info!(
                    sample_rate = self.config.sample_rate,
                    "audio output context started"
                );
                Ok(())
            }
        }
    }

    pub fn phase(&self, id: &str) -> Option<ChannelPhase> {
        self.registry.phase(id)
    }

    /// Ids of every occupied slot, external clips included.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.registry.active()
    }

    pub fn active_len(&self) -> usize {
        self.registry.len()
    }

    /// The volume target as last requested, before smoothing.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub fn context_state(&self) -> ContextState {
        self.output.state()
    }
}
