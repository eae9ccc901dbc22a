use rtrb::{Consumer, Producer};

use crate::{
    engine::{
        channel::{Channel, ChannelTransition},
        command::{ChannelEvent, EngineCommand},
        master::MasterBus,
    },
    graph::node::RenderCtx,
    MAX_BLOCK_SIZE,
};

/// Audio-side owner of the live channels and the master bus.
///
/// Runs inside the output callback (or is driven manually when the engine is
/// offline). Each block it drains pending commands, renders and sums every
/// channel, applies the master volume, then retires channels whose release
/// completed, reporting lifecycle transitions back through the event ring.
///
/// Blocks must not exceed `MAX_BLOCK_SIZE` frames; the output context
/// renders in chunks that respect this.
pub struct Mixer {
    channels: Vec<Channel>,
    master: MasterBus,
    commands: Consumer<EngineCommand>,
    events: Producer<ChannelEvent>,
    temp_buffer: Vec<f32>,
    sample_rate: f32,
}

impl Mixer {
    pub(crate) fn new(
        sample_rate: f32,
        initial_volume: f32,
        commands: Consumer<EngineCommand>,
        events: Producer<ChannelEvent>,
    ) -> Self {
        Self {
            channels: Vec::new(),
            master: MasterBus::new(initial_volume),
            commands,
            events,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate,
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);
        let ctx = RenderCtx::new(self.sample_rate);

        // Process control commands
        while let Ok(command) = self.commands.pop() {
            match command {
                EngineCommand::Play {
                    token,
                    kind,
                    buffer,
                } => {
                    self.channels.push(Channel::start(token, kind, buffer, &ctx));
                }
                EngineCommand::Stop { token } => {
                    if let Some(channel) =
                        self.channels.iter_mut().find(|c| c.token() == token)
                    {
                        channel.release(&ctx);
                    }
                }
                EngineCommand::StopAll => {
                    for channel in &mut self.channels {
                        channel.release(&ctx);
                    }
                }
                EngineCommand::SetVolume(volume) => {
                    self.master.set_volume(volume);
                }
            }
        }

        // Mix channels
        out.fill(0.0);
        for channel in &mut self.channels {
            let frames = &mut self.temp_buffer[..out.len()];
            frames.fill(0.0);
            let transition = channel.render(frames, &ctx);

            for (o, s) in out.iter_mut().zip(frames.iter()) {
                *o += s;
            }

            let event = match transition {
                ChannelTransition::ReachedFull => Some(ChannelEvent::ReachedFull {
                    token: channel.token(),
                }),
                ChannelTransition::Finished => Some(ChannelEvent::Finished {
                    token: channel.token(),
                }),
                ChannelTransition::None => None,
            };
            if let Some(event) = event {
                if self.events.push(event).is_err() {
                    tracing::warn!(?event, "event ring full, lifecycle event dropped");
                }
            }
        }

        self.master.process(out, &ctx);

        // Retire channels whose release completed; buffer and graph nodes
        // are dropped here, exactly once.
        self.channels.retain(|channel| !channel.is_finished());
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn master_volume(&self) -> f32 {
        self.master.target()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
