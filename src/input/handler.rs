use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, BoardStyle, Direction};

/// Which board the player picked on a selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardChoice {
    Style(BoardStyle),
    Random,
}

impl BoardChoice {
    pub fn style(&self) -> Option<BoardStyle> {
        match self {
            BoardChoice::Style(style) => Some(*style),
            BoardChoice::Random => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    SelectBoard(BoardChoice),
    TogglePause,
    ToggleMute,
    Restart,
    /// Leave the current screen (title screen: quit)
    Back,
    Quit,
    None,
}

/// Maps key presses to actions; holds no state
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::GameAction(Action::Move(direction));
        }

        match key.code {
            KeyCode::Char(c @ '1'..='4') => BoardStyle::from_index(c as usize - '1' as usize)
                .map(|style| KeyAction::SelectBoard(BoardChoice::Style(style)))
                .unwrap_or(KeyAction::None),
            KeyCode::Char('0') | KeyCode::Enter => KeyAction::SelectBoard(BoardChoice::Random),
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'm' => KeyAction::ToggleMute,
                'r' => KeyAction::Restart,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    /// Arrow keys and WASD, either case
    fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Up),
                's' => Some(Direction::Down),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
