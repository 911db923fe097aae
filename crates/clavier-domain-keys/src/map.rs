use crate::keyboard::{Keyboard, Note, NoteKind};
use crate::layout::{DegreeLayout, HandLayout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBounds {
    pub min: i32,
    pub max: i32,
}

impl ShiftBounds {
    /// Degenerate bounds may have min == max == 0; clamp must not panic then.
    pub fn clamp(self, value: i32) -> i32 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Legal shift range for a chromatic hand layout: every white offset the
/// layout defines must land inside the note table for every legal shift.
pub fn shift_bounds(keyboard: &Keyboard, layout: &HandLayout) -> ShiftBounds {
    let min_offset = layout
        .white
        .iter()
        .map(|binding| binding.white_offset)
        .min()
        .unwrap_or(0);
    let max_offset = layout
        .white
        .iter()
        .map(|binding| binding.white_offset)
        .max()
        .unwrap_or(0);

    let base = keyboard.base_white_position() as i32;
    ShiftBounds {
        min: -base - min_offset,
        max: keyboard.white_count() as i32 - 1 - base - max_offset,
    }
}

pub fn resolve_white<'a>(keyboard: &'a Keyboard, shift: i32, white_offset: i32) -> Option<&'a Note> {
    let target = keyboard.base_white_position() as i32 + shift + white_offset;
    keyboard.note(keyboard.white_index_at(target)?)
}

/// The sharped note immediately after the white key at `after_white_offset`.
/// None where two naturals are adjacent (E-F, B-C) or out of range.
pub fn resolve_black<'a>(
    keyboard: &'a Keyboard,
    shift: i32,
    after_white_offset: i32,
) -> Option<&'a Note> {
    let left = resolve_white(keyboard, shift, after_white_offset)?;
    let candidate = keyboard.note(left.index + 1)?;
    (candidate.kind == NoteKind::Black).then_some(candidate)
}

/// Position in `diatonic` where the 7-degree window for `shift` starts.
/// The window is clamped so a full run of 7 degrees always fits; a scale
/// with fewer than 7 entries has no window at all.
pub fn scale_start_index(keyboard: &Keyboard, diatonic: &[usize], shift: i32) -> Option<usize> {
    if diatonic.is_empty() {
        return None;
    }
    let anchor_white = keyboard.base_white_position() as i32 + shift;
    let anchor_index = keyboard.white_index_at(anchor_white)?;

    let mut start = match diatonic.iter().position(|&index| index >= anchor_index) {
        Some(position) => position,
        None => {
            let tail = diatonic.len() as i32 - 7;
            if tail < 0 {
                return None;
            }
            tail as usize
        }
    };

    if start + 6 >= diatonic.len() {
        start = diatonic.len().saturating_sub(7);
    }

    Some(start)
}

pub fn resolve_degree<'a>(
    keyboard: &'a Keyboard,
    diatonic: &[usize],
    shift: i32,
    degree_offset: usize,
) -> Option<&'a Note> {
    let start = scale_start_index(keyboard, diatonic, shift)?;
    let note_index = diatonic.get(start + degree_offset).copied()?;
    keyboard.note(note_index)
}

/// Scale-mode shift range, found by scanning every candidate shift and
/// keeping those with a complete 7-degree window. O(white-key range), run
/// only when the active scale or layout changes.
pub fn scale_shift_bounds(keyboard: &Keyboard, diatonic: &[usize]) -> ShiftBounds {
    let base = keyboard.base_white_position() as i32;
    let min_candidate = -base;
    let max_candidate = keyboard.white_count() as i32 - 1 - base;

    let mut valid = Vec::new();
    for shift in min_candidate..=max_candidate {
        let Some(start) = scale_start_index(keyboard, diatonic, shift) else {
            continue;
        };
        if start + 6 < diatonic.len() {
            valid.push(shift);
        }
    }

    match (valid.first(), valid.last()) {
        (Some(&min), Some(&max)) => ShiftBounds { min, max },
        _ => ShiftBounds { min: 0, max: 0 },
    }
}

/// Every pitch a chromatic hand layout can reach at `shift`, in keyboard order.
pub fn playable_hand(keyboard: &Keyboard, layout: &HandLayout, shift: i32) -> Vec<String> {
    let mut indices = BTreeSet::new();
    for binding in layout.white {
        if let Some(note) = resolve_white(keyboard, shift, binding.white_offset) {
            indices.insert(note.index);
        }
    }
    for binding in layout.black {
        if let Some(note) = resolve_black(keyboard, shift, binding.after_white_offset) {
            indices.insert(note.index);
        }
    }
    collect_names(keyboard, indices)
}

/// Every pitch a degree layout can reach at `shift`, in keyboard order.
pub fn playable_degrees(
    keyboard: &Keyboard,
    diatonic: &[usize],
    layout: &DegreeLayout,
    shift: i32,
) -> Vec<String> {
    let mut indices = BTreeSet::new();
    for binding in layout.degrees {
        if let Some(note) = resolve_degree(keyboard, diatonic, shift, binding.degree_offset) {
            indices.insert(note.index);
        }
    }
    collect_names(keyboard, indices)
}

fn collect_names(keyboard: &Keyboard, indices: BTreeSet<usize>) -> Vec<String> {
    indices
        .into_iter()
        .filter_map(|index| keyboard.note(index).map(|note| note.name.clone()))
        .collect()
}
