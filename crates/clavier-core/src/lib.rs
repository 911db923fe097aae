pub mod diagnostics;
pub mod dispatch;
pub mod engine;
pub mod ipc;
pub mod voices;

pub use diagnostics::*;
pub use dispatch::*;
pub use engine::*;
pub use ipc::*;
pub use voices::*;
