use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval has elapsed.
    Tick,
    /// The screen is out of date.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
