use crate::ipc::PlayMode;
use clavier_domain_keys::{
    HandShiftKeys, KeyLayoutKind, ScaleQuality, MAJOR_SHIFT_STEP, MINOR_SHIFT_STEP, NAV_BINDINGS,
};
use clavier_ports::types::Hand;
use std::collections::HashSet;

/// Navigation resolved from a key press. Anything the dispatcher does not
/// claim falls through to note resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    SetQuality(ScaleQuality),
    SelectRoot(&'static str),
    CycleRoot(i32),
    ChangeShift { hand: Hand, delta: i32 },
    CycleMode(i32),
}

/// Normalizes raw input symbols and suppresses auto-repeat via a held-set:
/// a down event for a symbol already held is dropped entirely.
pub struct InputDispatcher {
    held: HashSet<String>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Marks `key` held; false means it already was (auto-repeat).
    pub fn press(&mut self, key: &str) -> bool {
        self.held.insert(key.to_string())
    }

    pub fn release(&mut self, key: &str) -> bool {
        self.held.remove(key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// First navigation binding matching `key` under the current mode, in
    /// priority order: scale navigation, then per-hand shifts, then mode
    /// cycling. None leaves the key to note resolution.
    pub fn route(&self, mode: PlayMode, layout: KeyLayoutKind, key: &str) -> Option<NavAction> {
        if mode == PlayMode::Scale {
            if let Some(action) = route_scale_nav(key) {
                return Some(action);
            }
        }

        let bindings = layout.shift_bindings();
        match mode {
            PlayMode::Scale | PlayMode::Dual => {
                if let Some(action) = match_shift_keys(&bindings.left, Hand::Left, key) {
                    return Some(action);
                }
                if let Some(action) = match_shift_keys(&bindings.right, Hand::Right, key) {
                    return Some(action);
                }
            }
            PlayMode::Standard => {
                if let Some(action) = match_shift_keys(&bindings.left, Hand::Left, key) {
                    return Some(action);
                }
            }
        }

        if NAV_BINDINGS.mode_next == Some(key) {
            return Some(NavAction::CycleMode(1));
        }
        if NAV_BINDINGS.mode_prev == Some(key) {
            return Some(NavAction::CycleMode(-1));
        }

        None
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn route_scale_nav(key: &str) -> Option<NavAction> {
    if NAV_BINDINGS.quality_major == Some(key) {
        return Some(NavAction::SetQuality(ScaleQuality::Major));
    }
    if NAV_BINDINGS.quality_minor == Some(key) {
        return Some(NavAction::SetQuality(ScaleQuality::Minor));
    }
    if let Some(&(_, root)) = NAV_BINDINGS
        .root_select
        .iter()
        .find(|(bound, _)| *bound == key)
    {
        return Some(NavAction::SelectRoot(root));
    }
    if NAV_BINDINGS.root_next == Some(key) {
        return Some(NavAction::CycleRoot(1));
    }
    if NAV_BINDINGS.root_prev == Some(key) {
        return Some(NavAction::CycleRoot(-1));
    }
    None
}

fn match_shift_keys(keys: &HandShiftKeys, hand: Hand, key: &str) -> Option<NavAction> {
    let delta = if key == keys.minor_up {
        MINOR_SHIFT_STEP
    } else if key == keys.minor_down {
        -MINOR_SHIFT_STEP
    } else if key == keys.major_up {
        MAJOR_SHIFT_STEP
    } else if key == keys.major_down {
        -MAJOR_SHIFT_STEP
    } else {
        return None;
    };
    Some(NavAction::ChangeShift { hand, delta })
}
