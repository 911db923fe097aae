use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipDirection {
    Up,
    Down,
    Left,
    Right,
}

/// State changes worth surfacing to the user. The engine supplies the raw
/// previous/next labels; presentation decides animation direction and styling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    ModeChanged { label: String, previous: String },
    ScaleChanged { label: String, previous: String },
}

pub trait NotifyPort: Send + Sync {
    fn notify(&self, notice: Notice);
}
