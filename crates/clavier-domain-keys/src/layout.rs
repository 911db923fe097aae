use serde::{Deserialize, Serialize};

/// White-key transposition applied by the minor/major shift bindings.
pub const MINOR_SHIFT_STEP: i32 = 2;
pub const MAJOR_SHIFT_STEP: i32 = 3;

/// Physical key row convention. Each variant carries its own static binding
/// tables; there is no runtime table registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyLayoutKind {
    Qwerty,
    Qwertz,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WhiteBinding {
    pub key: &'static str,
    pub white_offset: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlackBinding {
    pub key: &'static str,
    /// White offset of the natural immediately preceding the sharped note.
    /// Resolution yields nothing where no sharp follows (E-F, B-C).
    pub after_white_offset: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegreeBinding {
    pub key: &'static str,
    /// Offset into the 7-degree diatonic window, 7 being the octave above.
    pub degree_offset: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct HandLayout {
    pub white: &'static [WhiteBinding],
    pub black: &'static [BlackBinding],
}

#[derive(Clone, Copy, Debug)]
pub struct DualLayout {
    pub left: HandLayout,
    pub right: HandLayout,
}

#[derive(Clone, Copy, Debug)]
pub struct DegreeLayout {
    pub degrees: &'static [DegreeBinding],
}

#[derive(Clone, Copy, Debug)]
pub struct ScaleLayout {
    pub left: DegreeLayout,
    pub right: DegreeLayout,
}

#[derive(Clone, Copy, Debug)]
pub struct HandShiftKeys {
    pub minor_up: &'static str,
    pub minor_down: &'static str,
    pub major_up: &'static str,
    pub major_down: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct ShiftBindings {
    pub left: HandShiftKeys,
    pub right: HandShiftKeys,
}

/// Navigation keys shared by both physical layouts. A `None` entry leaves
/// that action without a keyboard binding.
#[derive(Clone, Copy, Debug)]
pub struct NavBindings {
    pub mode_next: Option<&'static str>,
    pub mode_prev: Option<&'static str>,
    pub root_next: Option<&'static str>,
    pub root_prev: Option<&'static str>,
    pub quality_major: Option<&'static str>,
    pub quality_minor: Option<&'static str>,
    pub root_select: &'static [(&'static str, &'static str)],
}

pub const NAV_BINDINGS: NavBindings = NavBindings {
    mode_next: Some("0"),
    mode_prev: Some("9"),
    root_next: Some("2"),
    root_prev: Some("1"),
    quality_major: Some("3"),
    quality_minor: Some("4"),
    root_select: &[],
};

const SINGLE_WHITE: [WhiteBinding; 7] = [
    WhiteBinding { key: "a", white_offset: 0 },
    WhiteBinding { key: "s", white_offset: 1 },
    WhiteBinding { key: "d", white_offset: 2 },
    WhiteBinding { key: "f", white_offset: 3 },
    WhiteBinding { key: "g", white_offset: 4 },
    WhiteBinding { key: "h", white_offset: 5 },
    WhiteBinding { key: "j", white_offset: 6 },
];

const SINGLE_BLACK_QWERTY: [BlackBinding; 7] = [
    BlackBinding { key: "q", after_white_offset: -1 },
    BlackBinding { key: "w", after_white_offset: 0 },
    BlackBinding { key: "e", after_white_offset: 1 },
    BlackBinding { key: "r", after_white_offset: 2 },
    BlackBinding { key: "t", after_white_offset: 3 },
    BlackBinding { key: "y", after_white_offset: 4 },
    BlackBinding { key: "u", after_white_offset: 5 },
];

const SINGLE_BLACK_QWERTZ: [BlackBinding; 7] = [
    BlackBinding { key: "q", after_white_offset: -1 },
    BlackBinding { key: "w", after_white_offset: 0 },
    BlackBinding { key: "e", after_white_offset: 1 },
    BlackBinding { key: "r", after_white_offset: 2 },
    BlackBinding { key: "t", after_white_offset: 3 },
    BlackBinding { key: "z", after_white_offset: 4 },
    BlackBinding { key: "u", after_white_offset: 5 },
];

const DUAL_LEFT_WHITE: [WhiteBinding; 5] = [
    WhiteBinding { key: "a", white_offset: 0 },
    WhiteBinding { key: "s", white_offset: 1 },
    WhiteBinding { key: "d", white_offset: 2 },
    WhiteBinding { key: "f", white_offset: 3 },
    WhiteBinding { key: "g", white_offset: 4 },
];

const DUAL_LEFT_BLACK: [BlackBinding; 5] = [
    BlackBinding { key: "q", after_white_offset: -1 },
    BlackBinding { key: "w", after_white_offset: 0 },
    BlackBinding { key: "e", after_white_offset: 1 },
    BlackBinding { key: "r", after_white_offset: 2 },
    BlackBinding { key: "t", after_white_offset: 3 },
];

const DUAL_RIGHT_WHITE_QWERTY: [WhiteBinding; 5] = [
    WhiteBinding { key: "h", white_offset: 0 },
    WhiteBinding { key: "j", white_offset: 1 },
    WhiteBinding { key: "k", white_offset: 2 },
    WhiteBinding { key: "l", white_offset: 3 },
    WhiteBinding { key: ";", white_offset: 4 },
];

const DUAL_RIGHT_WHITE_QWERTZ: [WhiteBinding; 5] = [
    WhiteBinding { key: "h", white_offset: 0 },
    WhiteBinding { key: "j", white_offset: 1 },
    WhiteBinding { key: "k", white_offset: 2 },
    WhiteBinding { key: "l", white_offset: 3 },
    WhiteBinding { key: "ö", white_offset: 4 },
];

const DUAL_RIGHT_BLACK_QWERTY: [BlackBinding; 5] = [
    BlackBinding { key: "y", after_white_offset: -1 },
    BlackBinding { key: "u", after_white_offset: 0 },
    BlackBinding { key: "i", after_white_offset: 1 },
    BlackBinding { key: "o", after_white_offset: 2 },
    BlackBinding { key: "p", after_white_offset: 3 },
];

const DUAL_RIGHT_BLACK_QWERTZ: [BlackBinding; 5] = [
    BlackBinding { key: "z", after_white_offset: -1 },
    BlackBinding { key: "u", after_white_offset: 0 },
    BlackBinding { key: "i", after_white_offset: 1 },
    BlackBinding { key: "o", after_white_offset: 2 },
    BlackBinding { key: "p", after_white_offset: 3 },
];

const SCALE_LEFT: [DegreeBinding; 8] = [
    DegreeBinding { key: "a", degree_offset: 0 },
    DegreeBinding { key: "s", degree_offset: 1 },
    DegreeBinding { key: "d", degree_offset: 2 },
    DegreeBinding { key: "f", degree_offset: 3 },
    DegreeBinding { key: "g", degree_offset: 4 },
    DegreeBinding { key: "w", degree_offset: 5 },
    DegreeBinding { key: "e", degree_offset: 6 },
    DegreeBinding { key: "r", degree_offset: 7 },
];

const SCALE_RIGHT_QWERTY: [DegreeBinding; 8] = [
    DegreeBinding { key: "h", degree_offset: 0 },
    DegreeBinding { key: "j", degree_offset: 1 },
    DegreeBinding { key: "k", degree_offset: 2 },
    DegreeBinding { key: "l", degree_offset: 3 },
    DegreeBinding { key: ";", degree_offset: 4 },
    DegreeBinding { key: "u", degree_offset: 5 },
    DegreeBinding { key: "i", degree_offset: 6 },
    DegreeBinding { key: "o", degree_offset: 7 },
];

const SCALE_RIGHT_QWERTZ: [DegreeBinding; 8] = [
    DegreeBinding { key: "h", degree_offset: 0 },
    DegreeBinding { key: "j", degree_offset: 1 },
    DegreeBinding { key: "k", degree_offset: 2 },
    DegreeBinding { key: "l", degree_offset: 3 },
    DegreeBinding { key: "ö", degree_offset: 4 },
    DegreeBinding { key: "u", degree_offset: 5 },
    DegreeBinding { key: "i", degree_offset: 6 },
    DegreeBinding { key: "o", degree_offset: 7 },
];

const SHIFT_QWERTY: ShiftBindings = ShiftBindings {
    left: HandShiftKeys {
        minor_up: "c",
        minor_down: "x",
        major_up: "v",
        major_down: "z",
    },
    right: HandShiftKeys {
        minor_up: ".",
        minor_down: ",",
        major_up: "/",
        major_down: "m",
    },
};

const SHIFT_QWERTZ: ShiftBindings = ShiftBindings {
    left: HandShiftKeys {
        minor_up: "c",
        minor_down: "x",
        major_up: "v",
        major_down: "y",
    },
    right: HandShiftKeys {
        minor_up: ",",
        minor_down: "m",
        major_up: ".",
        major_down: "n",
    },
};

impl KeyLayoutKind {
    pub const ALL: [KeyLayoutKind; 2] = [KeyLayoutKind::Qwerty, KeyLayoutKind::Qwertz];

    pub fn label(self) -> &'static str {
        match self {
            KeyLayoutKind::Qwerty => "QWERTY",
            KeyLayoutKind::Qwertz => "QWERTZ",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            KeyLayoutKind::Qwerty => KeyLayoutKind::Qwertz,
            KeyLayoutKind::Qwertz => KeyLayoutKind::Qwerty,
        }
    }

    pub fn single(self) -> HandLayout {
        match self {
            KeyLayoutKind::Qwerty => HandLayout {
                white: &SINGLE_WHITE,
                black: &SINGLE_BLACK_QWERTY,
            },
            KeyLayoutKind::Qwertz => HandLayout {
                white: &SINGLE_WHITE,
                black: &SINGLE_BLACK_QWERTZ,
            },
        }
    }

    pub fn dual(self) -> DualLayout {
        let left = HandLayout {
            white: &DUAL_LEFT_WHITE,
            black: &DUAL_LEFT_BLACK,
        };
        match self {
            KeyLayoutKind::Qwerty => DualLayout {
                left,
                right: HandLayout {
                    white: &DUAL_RIGHT_WHITE_QWERTY,
                    black: &DUAL_RIGHT_BLACK_QWERTY,
                },
            },
            KeyLayoutKind::Qwertz => DualLayout {
                left,
                right: HandLayout {
                    white: &DUAL_RIGHT_WHITE_QWERTZ,
                    black: &DUAL_RIGHT_BLACK_QWERTZ,
                },
            },
        }
    }

    pub fn scale(self) -> ScaleLayout {
        let left = DegreeLayout {
            degrees: &SCALE_LEFT,
        };
        match self {
            KeyLayoutKind::Qwerty => ScaleLayout {
                left,
                right: DegreeLayout {
                    degrees: &SCALE_RIGHT_QWERTY,
                },
            },
            KeyLayoutKind::Qwertz => ScaleLayout {
                left,
                right: DegreeLayout {
                    degrees: &SCALE_RIGHT_QWERTZ,
                },
            },
        }
    }

    pub fn shift_bindings(self) -> ShiftBindings {
        match self {
            KeyLayoutKind::Qwerty => SHIFT_QWERTY,
            KeyLayoutKind::Qwertz => SHIFT_QWERTZ,
        }
    }
}
