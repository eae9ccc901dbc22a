//! Static catalog of sound descriptors consumed by presentation layers.
//!
//! The engine itself never reads labels or categories; it only cares about
//! the id and the noise kind behind it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::noise::NoiseKind;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCategory {
    Nature,
    Daily,
    Human,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy)]
pub struct SoundDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub category: SoundCategory,
    pub kind: NoiseKind,
}

/// The built-in sound set. Sounds with no dedicated generator carry
/// `Unspecified` and fall back to pink at play time.
pub fn default_sounds() -> &'static [SoundDescriptor] {
    use NoiseKind::{Brown, Pink, Unspecified, White};
    use SoundCategory::{Daily, Human, Nature};

    const SOUNDS: &[SoundDescriptor] = &[
        SoundDescriptor { id: "heartbeat", label: "Heartbeat", category: Human, kind: Brown },
        SoundDescriptor { id: "shush", label: "Shushing", category: Human, kind: White },
        SoundDescriptor { id: "ah-sound", label: "Soft Voice", category: Human, kind: Brown },
        SoundDescriptor { id: "waves", label: "Ocean Waves", category: Nature, kind: Pink },
        SoundDescriptor { id: "forest", label: "Forest", category: Nature, kind: Pink },
        SoundDescriptor { id: "stream", label: "Stream", category: Nature, kind: Pink },
        SoundDescriptor { id: "fire", label: "Crackling Fire", category: Nature, kind: Brown },
        SoundDescriptor { id: "leaves", label: "Fallen Leaves", category: Nature, kind: Pink },
        SoundDescriptor { id: "crickets", label: "Crickets", category: Nature, kind: Unspecified },
        SoundDescriptor { id: "cave", label: "Cave Drips", category: Nature, kind: Brown },
        SoundDescriptor { id: "birds", label: "Morning Birds", category: Nature, kind: Unspecified },
        SoundDescriptor { id: "reeds", label: "Reed Field", category: Nature, kind: Pink },
        SoundDescriptor { id: "vacuum", label: "Vacuum Cleaner", category: Daily, kind: Brown },
        SoundDescriptor { id: "vinyl", label: "Vinyl Crackle", category: Daily, kind: White },
        SoundDescriptor { id: "cafe", label: "Cafe Chatter", category: Daily, kind: Unspecified },
        SoundDescriptor { id: "road", label: "Road Traffic", category: Daily, kind: Brown },
        SoundDescriptor { id: "fan", label: "Electric Fan", category: Daily, kind: White },
        SoundDescriptor { id: "dishwasher", label: "Dishwasher", category: Daily, kind: Brown },
        SoundDescriptor { id: "kettle", label: "Kettle", category: Daily, kind: White },
        SoundDescriptor { id: "keyboard", label: "Keyboard", category: Daily, kind: Unspecified },
        SoundDescriptor { id: "pencil", label: "Pencil Writing", category: Daily, kind: White },
    ];
    SOUNDS
}
