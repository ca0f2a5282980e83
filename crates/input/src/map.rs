//! Key mapping from terminal events to game commands.
//!
//! [`KeyBindings`] is the configurable, serde-friendly form: one key name per
//! command. [`KeyMap`] is the resolved form used on the hot path.
//!
//! Key names are case-insensitive: a single character (`"w"`), or one of
//! `space`, `up`, `down`, `left`, `right`, `esc`, `enter`, `tab`, `backspace`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Command;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyBindingError {
    #[error("unknown key name {name:?} for {command}")]
    UnknownKey { command: &'static str, name: String },

    #[error("key {name:?} is bound to both {first} and {second}")]
    Duplicate {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Key name per command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub horizontal_rotate_clockwise: String,
    pub horizontal_rotate_counter_clockwise: String,
    pub vertical_rotate_away: String,
    pub vertical_rotate_towards: String,
    pub move_away: String,
    pub move_towards: String,
    pub accelerate: String,
    pub camera_left: String,
    pub camera_right: String,
    pub camera_up: String,
    pub camera_down: String,
    pub pause: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            horizontal_rotate_clockwise: "a".into(),
            horizontal_rotate_counter_clockwise: "d".into(),
            vertical_rotate_away: "w".into(),
            vertical_rotate_towards: "s".into(),
            move_away: "q".into(),
            move_towards: "e".into(),
            accelerate: "space".into(),
            camera_left: "left".into(),
            camera_right: "right".into(),
            camera_up: "up".into(),
            camera_down: "down".into(),
            pause: "p".into(),
            quit: "esc".into(),
        }
    }
}

impl KeyBindings {
    /// Key name bound to a command
    pub fn key_name(&self, cmd: Command) -> &str {
        match cmd {
            Command::HorizontalRotateClockwise => &self.horizontal_rotate_clockwise,
            Command::HorizontalRotateCounterClockwise => &self.horizontal_rotate_counter_clockwise,
            Command::VerticalRotateAway => &self.vertical_rotate_away,
            Command::VerticalRotateTowards => &self.vertical_rotate_towards,
            Command::MoveAway => &self.move_away,
            Command::MoveTowards => &self.move_towards,
            Command::Accelerate => &self.accelerate,
            Command::CameraLeft => &self.camera_left,
            Command::CameraRight => &self.camera_right,
            Command::CameraUp => &self.camera_up,
            Command::CameraDown => &self.camera_down,
            Command::Pause => &self.pause,
            Command::Quit => &self.quit,
        }
    }

    /// Parse every key name and reject keys bound twice
    pub fn resolve(&self) -> Result<KeyMap, KeyBindingError> {
        let mut entries = [(KeyCode::Null, Command::Quit); Command::COUNT];
        for (slot, cmd) in entries.iter_mut().zip(Command::ALL) {
            let name = self.key_name(cmd);
            let code = parse_key(name).ok_or_else(|| KeyBindingError::UnknownKey {
                command: cmd.as_str(),
                name: name.to_string(),
            })?;
            *slot = (code, cmd);
        }

        for (i, (code, first)) in entries.iter().enumerate() {
            if let Some((_, second)) = entries[i + 1..].iter().find(|(other, _)| other == code) {
                return Err(KeyBindingError::Duplicate {
                    name: self.key_name(*first).to_string(),
                    first: first.as_str(),
                    second: second.as_str(),
                });
            }
        }

        Ok(KeyMap { entries })
    }
}

/// Parse a key name into a key code
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let lower = name.trim().to_lowercase();
    let mut chars = lower.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match lower.as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        _ => None,
    }
}

/// Resolved bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    entries: [(KeyCode, Command); Command::COUNT],
}

impl KeyMap {
    /// Map a key event to the command bound to it (letters match either case)
    pub fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.entries
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|&(_, cmd)| cmd)
    }

    pub fn key_for(&self, cmd: Command) -> KeyCode {
        self.entries[cmd.index()].0
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_KEYS,
        }
    }
}

const DEFAULT_KEYS: [(KeyCode, Command); Command::COUNT] = [
    (KeyCode::Char('a'), Command::HorizontalRotateClockwise),
    (KeyCode::Char('d'), Command::HorizontalRotateCounterClockwise),
    (KeyCode::Char('w'), Command::VerticalRotateAway),
    (KeyCode::Char('s'), Command::VerticalRotateTowards),
    (KeyCode::Char('q'), Command::MoveAway),
    (KeyCode::Char('e'), Command::MoveTowards),
    (KeyCode::Char(' '), Command::Accelerate),
    (KeyCode::Left, Command::CameraLeft),
    (KeyCode::Right, Command::CameraRight),
    (KeyCode::Up, Command::CameraUp),
    (KeyCode::Down, Command::CameraDown),
    (KeyCode::Char('p'), Command::Pause),
    (KeyCode::Esc, Command::Quit),
];

/// Short display label for a key, for help panels
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

/// Ctrl+C always quits, whatever the bindings say.
pub fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
