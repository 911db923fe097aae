use clavier_domain_feel::PlayFeel;
use clavier_domain_keys::{KeyLayoutKind, ScaleQuality, ShiftBounds};
use clavier_ports::types::Hand;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    Standard,
    Dual,
    Scale,
}

impl PlayMode {
    pub const ALL: [PlayMode; 3] = [PlayMode::Standard, PlayMode::Dual, PlayMode::Scale];

    pub fn label(self) -> &'static str {
        match self {
            PlayMode::Standard => "STANDARD",
            PlayMode::Dual => "DUAL",
            PlayMode::Scale => "SCALE",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    KeyDown { key: String },
    KeyUp { key: String },
    PointerDown { pitch: String },
    PointerUp { pitch: String },
    ChangeShift { hand: Hand, delta: i32 },
    ShiftMode { delta: i32 },
    ShiftScale { delta: i32 },
    SetScaleRoot { root: String },
    SetScaleQuality { quality: ScaleQuality },
    SetLayout { layout: KeyLayoutKind },
    ToggleLayout,
    FocusLost,
    StopAll,
    ExportDiagnostics { path: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandView {
    pub shift: i32,
    pub bounds: ShiftBounds,
    pub playable: Vec<String>,
}

/// Read-only state for presentation layers; the engine never renders.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub layout: KeyLayoutKind,
    pub mode: String,
    pub scale: String,
    pub sounding: Vec<String>,
    pub left: HandView,
    pub right: HandView,
    pub combined_playable: Vec<String>,
    pub feel: PlayFeel,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    ModeChanged { label: String, previous: String },
    ScaleChanged { label: String, previous: String },
    SoundingChanged { pitches: Vec<String> },
    SnapshotUpdated { snapshot: EngineSnapshot },
    FeelUpdated { feel: PlayFeel },
}
