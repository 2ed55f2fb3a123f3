pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A move, rotation or phase change the engine refused to apply.
///
/// Rejections never modify the engine, so callers can ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidTransition {
    #[display("no game is running")]
    NotRunning,
    #[display("a game has already been started")]
    AlreadyStarted,
    #[display("piece would leave the grid")]
    OutOfBounds,
    #[display("piece would overlap settled cells")]
    Collision,
}
