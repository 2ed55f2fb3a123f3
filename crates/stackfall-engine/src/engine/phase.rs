/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum GamePhase {
    /// No game has been started since creation or the last reset.
    #[default]
    NotStarted,
    Running,
    Paused,
    /// A new piece could not be placed. Only a reset leaves this phase.
    GameOver,
}

/// Result of placing a new piece at the top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Placement {
    Spawned,
    /// The piece overlapped settled cells and the game is over.
    ToppedOut,
}

/// Result of moving the falling piece one row down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down and is still falling.
    Moved,
    /// The piece came to rest, `cleared_lines` rows were removed and the next
    /// piece is now falling.
    Locked { cleared_lines: usize },
    /// The piece came to rest but the next piece could not be placed.
    GameOver,
    /// No game is running, so nothing happened.
    Ignored,
}
