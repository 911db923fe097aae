use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteKind {
    White,
    Black,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub kind: NoteKind,
    pub index: usize,
}

const OCTAVE_TEMPLATE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The fixed 88-note range A0..C8. Built once; transposition is denominated
/// in white-key steps from the reference white key (C4).
#[derive(Clone, Debug)]
pub struct Keyboard {
    notes: Vec<Note>,
    white_positions: Vec<usize>,
    base_index: usize,
    base_white_position: usize,
}

impl Keyboard {
    pub fn new() -> Self {
        let mut names: Vec<String> = vec!["A0".into(), "A#0".into(), "B0".into()];
        for octave in 1..=7 {
            for name in OCTAVE_TEMPLATE {
                names.push(format!("{name}{octave}"));
            }
        }
        names.push("C8".into());

        let notes: Vec<Note> = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let kind = if name.contains('#') {
                    NoteKind::Black
                } else {
                    NoteKind::White
                };
                Note { name, kind, index }
            })
            .collect();

        let white_positions: Vec<usize> = notes
            .iter()
            .filter(|note| note.kind == NoteKind::White)
            .map(|note| note.index)
            .collect();

        let base_index = notes
            .iter()
            .position(|note| note.name == "C4")
            .unwrap_or(0);
        let base_white_position = white_positions
            .iter()
            .position(|&index| index == base_index)
            .unwrap_or(0);

        Self {
            notes,
            white_positions,
            base_index,
            base_white_position,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.name == name)
    }

    pub fn white_count(&self) -> usize {
        self.white_positions.len()
    }

    /// Note-table index of the white key at `position`, if in range.
    pub fn white_index_at(&self, position: i32) -> Option<usize> {
        if position < 0 {
            return None;
        }
        self.white_positions.get(position as usize).copied()
    }

    pub fn base_index(&self) -> usize {
        self.base_index
    }

    pub fn base_white_position(&self) -> usize {
        self.base_white_position
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Semitone class 0..11 of a note name, or None for malformed names.
pub fn pitch_class(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let base = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let sharp = u8::from(chars.next() == Some('#'));
    Some((base + sharp) % 12)
}

/// Absolute semitone number under the convention that places C4 at 60
/// (A0 = 21, C8 = 108).
pub fn absolute_semitone(name: &str) -> Option<i32> {
    let class = pitch_class(name)? as i32;
    let octave: i32 = name
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .ok()?;
    Some(class + 12 * (octave + 1))
}
