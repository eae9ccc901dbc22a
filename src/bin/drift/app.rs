//! Drift - application state and input handling

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use drift_audio::{
    catalog::{default_sounds, SoundDescriptor},
    engine::{AudioEngine, ChannelPhase, EngineConfig},
};

use super::ui;

/// How long to wait for input between frames
const TICK: Duration = Duration::from_millis(50);

pub struct Drift {
    engine: AudioEngine,
    sounds: &'static [SoundDescriptor],
    selected: usize,
    status: Option<String>,
    should_quit: bool,
}

impl Drift {
    pub fn new() -> Self {
        Self {
            engine: AudioEngine::new(EngineConfig::default()),
            sounds: default_sounds(),
            selected: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.engine.poll();
            terminal.draw(|frame| ui::render(frame, &self))?;
            self.handle_input()?;
        }
        self.engine.stop_all();
        Ok(())
    }

    fn handle_input(&mut self) -> EyreResult<()> {
        if !event::poll(TICK)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.selected = (self.selected + 1).min(self.sounds.len() - 1);
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
                KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_volume(0.05),
                KeyCode::Char('-') => self.nudge_volume(-0.05),
                KeyCode::Char('s') => {
                    self.engine.stop_all();
                    self.status = Some("stopped all sounds".into());
                }
                KeyCode::Char('p') => self.suspend(),
                _ => {}
            }
        }
        Ok(())
    }

    fn toggle_selected(&mut self) {
        let sound = self.sounds[self.selected];
        match self.engine.phase(sound.id) {
            Some(ChannelPhase::Starting | ChannelPhase::Playing | ChannelPhase::External) => {
                self.engine.stop(sound.id);
                self.status = None;
            }
            // A sound mid-fade-out restarts once its teardown completes
            Some(ChannelPhase::Stopping) | None => match self.engine.play(sound.id, sound.kind) {
                Ok(()) => self.status = None,
                Err(err) => self.status = Some(format!("{}: {err}", sound.label)),
            },
        }
    }

    fn nudge_volume(&mut self, delta: f32) {
        self.engine.set_volume(self.engine.volume() + delta);
    }

    fn suspend(&mut self) {
        match self.engine.suspend() {
            Ok(()) => self.status = Some("output suspended; toggle any sound to resume".into()),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    pub fn sounds(&self) -> &[SoundDescriptor] {
        self.sounds
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
