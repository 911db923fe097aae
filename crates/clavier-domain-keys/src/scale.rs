use crate::keyboard::{pitch_class, Keyboard};
use clavier_ports::notify::FlipDirection;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleQuality {
    Major,
    Minor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalePreset {
    pub id: &'static str,
    pub label: &'static str,
    pub root: &'static str,
    /// Semitone offsets from the root, ascending, within one octave.
    pub intervals: [u8; 7],
}

const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

pub const SCALE_PRESETS: [ScalePreset; 12] = [
    ScalePreset { id: "C_MAJOR", label: "CM", root: "C", intervals: MAJOR },
    ScalePreset { id: "C_MINOR", label: "Cm", root: "C", intervals: MINOR },
    ScalePreset { id: "D_MAJOR", label: "DM", root: "D", intervals: MAJOR },
    ScalePreset { id: "D_MINOR", label: "Dm", root: "D", intervals: MINOR },
    ScalePreset { id: "E_MAJOR", label: "EM", root: "E", intervals: MAJOR },
    ScalePreset { id: "E_MINOR", label: "Em", root: "E", intervals: MINOR },
    ScalePreset { id: "F_MAJOR", label: "FM", root: "F", intervals: MAJOR },
    ScalePreset { id: "F_MINOR", label: "Fm", root: "F", intervals: MINOR },
    ScalePreset { id: "G_MAJOR", label: "GM", root: "G", intervals: MAJOR },
    ScalePreset { id: "G_MINOR", label: "Gm", root: "G", intervals: MINOR },
    ScalePreset { id: "A_MAJOR", label: "AM", root: "A", intervals: MAJOR },
    ScalePreset { id: "A_MINOR", label: "Am", root: "A", intervals: MINOR },
];

impl ScalePreset {
    pub fn quality(&self) -> ScaleQuality {
        let id = self.id.to_ascii_lowercase();
        if id.contains("minor") {
            return ScaleQuality::Minor;
        }
        if id.contains("major") {
            return ScaleQuality::Major;
        }
        if self.label.ends_with('m') {
            ScaleQuality::Minor
        } else {
            ScaleQuality::Major
        }
    }
}

/// Catalog roots in first-appearance order, without duplicates.
pub fn distinct_roots() -> Vec<&'static str> {
    let mut roots = Vec::new();
    for preset in &SCALE_PRESETS {
        if !roots.contains(&preset.root) {
            roots.push(preset.root);
        }
    }
    roots
}

/// Catalog index of the preset matching `root` with the requested quality,
/// falling back to any preset with that root.
pub fn preset_index_for(root: &str, quality: ScaleQuality) -> Option<usize> {
    let root = root.to_ascii_uppercase();
    SCALE_PRESETS
        .iter()
        .position(|preset| preset.root == root && preset.quality() == quality)
        .or_else(|| SCALE_PRESETS.iter().position(|preset| preset.root == root))
}

pub fn preset_by_label(label: &str) -> Option<&'static ScalePreset> {
    SCALE_PRESETS.iter().find(|preset| preset.label == label)
}

/// Ordered note-table indices whose pitch class belongs to the scale.
pub fn diatonic_indices(keyboard: &Keyboard, preset: &ScalePreset) -> Vec<usize> {
    let Some(root_class) = pitch_class(preset.root) else {
        return Vec::new();
    };

    let mut allowed = [false; 12];
    for interval in preset.intervals {
        allowed[((root_class + interval) % 12) as usize] = true;
    }

    keyboard
        .notes()
        .iter()
        .filter(|note| {
            pitch_class(&note.name).is_some_and(|class| allowed[class as usize])
        })
        .map(|note| note.index)
        .collect()
}

/// Animation direction a notification collaborator gives a scale change:
/// root moves flip by shortest catalog distance, quality-only moves flip
/// vertically (minor up, major down).
pub fn flip_direction(prev: &ScalePreset, next: &ScalePreset) -> FlipDirection {
    if prev.root != next.root {
        let roots = distinct_roots();
        let prev_index = roots.iter().position(|&root| root == prev.root);
        let next_index = roots.iter().position(|&root| root == next.root);
        let (Some(prev_index), Some(next_index)) = (prev_index, next_index) else {
            return FlipDirection::Left;
        };
        let diff = (next_index + roots.len() - prev_index) % roots.len();
        return if diff == 0 || diff <= roots.len() / 2 {
            FlipDirection::Left
        } else {
            FlipDirection::Right
        };
    }

    if prev.quality() != next.quality() {
        return match next.quality() {
            ScaleQuality::Major => FlipDirection::Down,
            ScaleQuality::Minor => FlipDirection::Up,
        };
    }

    FlipDirection::Up
}
