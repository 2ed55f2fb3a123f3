use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player command decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum Command {
    Rotate,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    TogglePause,
    Start,
    Restart,
    Quit,
}

impl Command {
    /// Maps a key press to a command. Key releases and repeats of
    /// non-movement keys are ignored.
    pub(crate) fn from_key(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return (event.code == KeyCode::Char('c')).then_some(Self::Quit);
        }
        let command = match event.code {
            KeyCode::Up => Self::Rotate,
            KeyCode::Left => Self::MoveLeft,
            KeyCode::Right => Self::MoveRight,
            KeyCode::Down => Self::SoftDrop,
            KeyCode::Char(' ') => Self::HardDrop,
            KeyCode::Char('p' | 'P') => Self::TogglePause,
            KeyCode::Char('s' | 'S') => Self::Start,
            KeyCode::Char('r' | 'R') => Self::Restart,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        if event.kind == KeyEventKind::Repeat && !command.repeats() {
            return None;
        }
        Some(command)
    }

    /// Whether holding the key down keeps issuing the command.
    fn repeats(self) -> bool {
        matches!(
            self,
            Self::Rotate | Self::MoveLeft | Self::MoveRight | Self::SoftDrop
        )
    }
}
