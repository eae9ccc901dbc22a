use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::{engine::mixer::Mixer, MAX_BLOCK_SIZE};

/// Lifecycle of the platform output.
///
/// The context is created lazily on the first play request, never in a
/// constructor, so engines can be built before the platform allows audio
/// output. `Offline` contexts report ready without touching the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Uninitialized,
    Running,
    Suspended,
    Offline,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("no default output device available")]
    NoDevice,

    #[error("failed to fetch default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to pause output stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),

    #[error("output context not started")]
    NotStarted,
}

/// Owner of the cpal output stream.
pub struct OutputContext {
    state: ContextState,
    stream: Option<cpal::Stream>,
}

impl OutputContext {
    pub fn uninitialized() -> Self {
        Self {
            state: ContextState::Uninitialized,
            stream: None,
        }
    }

    pub fn offline() -> Self {
        Self {
            state: ContextState::Offline,
            stream: None,
        }
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ContextState::Running | ContextState::Offline)
    }

    /// Build the default output stream, hand the mixer to its callback, and
    /// start playback.
    ///
    /// The callback renders mono blocks of at most `MAX_BLOCK_SIZE` frames
    /// and duplicates them across the device's channels.
    pub fn start(&mut self, mixer: Arc<Mutex<Mixer>>, sample_rate: u32) -> Result<(), OutputError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(OutputError::NoDevice)?;
        let default_config = device.default_output_config()?;
        let channels = default_config.channels() as usize;

        let config = cpal::StreamConfig {
            channels: default_config.channels(),
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _| {
                let mut mixer = match mixer.lock() {
                    Ok(mixer) => mixer,
                    Err(poisoned) => poisoned.into_inner(),
                };

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    mixer.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;
        self.stream = Some(stream);
        self.state = ContextState::Running;
        Ok(())
    }

    /// Re-start a suspended stream. No-op for offline contexts.
    pub fn resume(&mut self) -> Result<(), OutputError> {
        if self.state == ContextState::Offline {
            return Ok(());
        }
        let stream = self.stream.as_ref().ok_or(OutputError::NotStarted)?;
        stream.play()?;
        self.state = ContextState::Running;
        Ok(())
    }

    /// Pause a running stream. No-op for offline contexts.
    pub fn pause(&mut self) -> Result<(), OutputError> {
        if self.state == ContextState::Offline {
            return Ok(());
        }
        let stream = self.stream.as_ref().ok_or(OutputError::NotStarted)?;
        stream.pause()?;
        self.state = ContextState::Suspended;
        Ok(())
    }
}
