pub mod feel;

pub use feel::*;
