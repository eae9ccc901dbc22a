use std::collections::HashMap;

use crate::dsp::noise::NoiseKind;
use crate::engine::command::ChannelEvent;

/// Control-side view of a channel's lifecycle.
///
/// `External` marks a slot occupied by a recorder-owned clip: it counts
/// toward active-channel accounting but has no synthesized audio behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPhase {
    Starting,
    Playing,
    Stopping,
    External,
}

/// Outcome of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Begin {
    /// The id was free; a channel may start under this token.
    Fresh(u64),
    /// The id is already active: idempotent no-op.
    Occupied,
    /// The id is tearing down; the play was queued behind the teardown.
    Queued,
}

/// Outcome of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopAction {
    /// Release the synthesized channel holding this token.
    Stop(u64),
    /// An external clip slot was cleared; nothing to command.
    ClearExternal,
    /// Unknown or already-stopping id: no-op.
    Ignore,
}

/// A play held back until its predecessor finishes tearing down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingPlay {
    pub id: String,
    pub kind: NoiseKind,
}

struct Slot {
    token: u64,
    phase: ChannelPhase,
    kind: NoiseKind,
    queued_restart: Option<NoiseKind>,
}

/// The set of currently known channels, keyed by caller-supplied id.
///
/// Enforces at-most-one-channel-per-id: a play against a live id is a no-op,
/// and a play against a stopping id is queued until the old channel's
/// teardown completes, so in-flight stop and start never coexist.
#[derive(Default)]
pub struct ChannelRegistry {
    slots: HashMap<String, Slot>,
    next_token: u64,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&mut self, id: &str, kind: NoiseKind) -> Begin {
        if let Some(slot) = self.slots.get_mut(id) {
            return if slot.phase == ChannelPhase::Stopping {
                slot.queued_restart = Some(kind);
                Begin::Queued
            } else {
                Begin::Occupied
            };
        }

        let token = self.mint_token();
        self.slots.insert(
            id.to_string(),
            Slot {
                token,
                phase: ChannelPhase::Starting,
                kind: kind.resolve(),
                queued_restart: None,
            },
        );
        Begin::Fresh(token)
    }

    /// Occupy a slot for an externally played clip. Returns false when the
    /// id is already taken.
    pub(crate) fn begin_external(&mut self, id: &str) -> bool {
        if self.slots.contains_key(id) {
            return false;
        }
        let token = self.mint_token();
        self.slots.insert(
            id.to_string(),
            Slot {
                token,
                phase: ChannelPhase::External,
                kind: NoiseKind::Unspecified,
                queued_restart: None,
            },
        );
        true
    }

    /// Roll back a `begin` whose channel never started (synthesis or
    /// context failure). Only valid before the channel was commanded.
    pub(crate) fn abort(&mut self, id: &str) {
        self.slots.remove(id);
    }

    /// Resolve what a stop on `id` should do. Cancels any queued restart
    /// (a stop supersedes an in-flight play) but does not flip the phase;
    /// callers confirm once the stop command is actually delivered.
    pub(crate) fn request_stop(&mut self, id: &str) -> StopAction {
        let Some(slot) = self.slots.get_mut(id) else {
            return StopAction::Ignore;
        };
        slot.queued_restart = None;
        let (phase, token) = (slot.phase, slot.token);

        match phase {
            ChannelPhase::External => {
                self.slots.remove(id);
                StopAction::ClearExternal
            }
            ChannelPhase::Stopping => StopAction::Ignore,
            ChannelPhase::Starting | ChannelPhase::Playing => StopAction::Stop(token),
        }
    }

    pub(crate) fn confirm_stopping(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.phase = ChannelPhase::Stopping;
        }
    }

    /// Flip every synthesized slot to stopping and drop external slots and
    /// queued restarts. Pairs with a delivered `StopAll` command.
    pub(crate) fn mark_all_stopping(&mut self) {
        self.slots
            .retain(|_, slot| slot.phase != ChannelPhase::External);
        for slot in self.slots.values_mut() {
            slot.phase = ChannelPhase::Stopping;
            slot.queued_restart = None;
        }
    }

    /// Apply a mixer event. A finished teardown releases the slot and
    /// surfaces any queued restart for the caller to issue.
    pub(crate) fn apply(&mut self, event: ChannelEvent) -> Option<PendingPlay> {
        match event {
            ChannelEvent::ReachedFull { token } => {
                if let Some(slot) = self
                    .slots
                    .values_mut()
                    .find(|slot| slot.token == token && slot.phase == ChannelPhase::Starting)
                {
                    slot.phase = ChannelPhase::Playing;
                }
                None
            }
            ChannelEvent::Finished { token } => {
                let id = self
                    .slots
                    .iter()
                    .find(|(_, slot)| slot.token == token)
                    .map(|(id, _)| id.clone())?;
                let slot = self.slots.remove(&id)?;
                slot.queued_restart.map(|kind| PendingPlay { id, kind })
            }
        }
    }

    pub fn phase(&self, id: &str) -> Option<ChannelPhase> {
        self.slots.get(id).map(|slot| slot.phase)
    }

    pub fn kind(&self, id: &str) -> Option<NoiseKind> {
        self.slots.get(id).map(|slot| slot.kind)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Ids of every occupied slot, external clips included.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn mint_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}
