pub mod notify;
pub mod tone;
pub mod types;

pub use notify::*;
pub use tone::*;
pub use types::*;
