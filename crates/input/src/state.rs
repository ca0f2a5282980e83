//! Per-frame command state with edge detection.
//!
//! Tracks which commands are held this frame and which were held last frame, so
//! the game sees a press exactly once however long the key stays down.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a key counts as released once no press or repeat arrived for a while.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::KeyMap;
use crate::types::{Command, FrameInput};

// Longer than a typical auto-repeat gap, shorter than a deliberate hold
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct InputState {
    /// Commands held now
    current: u16,
    /// Commands held at the end of the previous frame
    previous: u16,
    /// Commands that went down at any point this frame, even if already released
    latched: u16,
    /// Milliseconds since the last press/repeat of each held command
    held_ms: [Option<u32>; Command::COUNT],
    key_release_timeout_ms: Option<u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            current: 0,
            previous: 0,
            latched: 0,
            held_ms: [None; Command::COUNT],
            key_release_timeout_ms: Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    /// `None` disables the timeout, for terminals that report releases
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    /// Start a new frame: this frame's held set becomes the previous one
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
        self.latched = 0;
    }

    /// Record a press or auto-repeat of a command
    pub fn press(&mut self, cmd: Command) {
        let bit = bit(cmd);
        self.current |= bit;
        self.latched |= bit;
        self.held_ms[cmd.index()] = Some(0);
    }

    pub fn release(&mut self, cmd: Command) {
        self.current &= !bit(cmd);
        self.held_ms[cmd.index()] = None;
    }

    /// Feed one terminal key event. Returns the command it maps to, if any.
    pub fn handle_key_event(&mut self, key: &KeyEvent, keys: &KeyMap) -> Option<Command> {
        let cmd = keys.command_for(key)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(cmd),
            KeyEventKind::Release => self.release(cmd),
        }
        Some(cmd)
    }

    /// Age held keys and release the ones past the timeout
    pub fn advance(&mut self, elapsed_ms: u32) {
        let Some(timeout) = self.key_release_timeout_ms else {
            return;
        };
        for cmd in Command::ALL {
            if let Some(age) = self.held_ms[cmd.index()] {
                let age = age.saturating_add(elapsed_ms);
                if age > timeout {
                    log::trace!("{} released after {age}ms without repeat", cmd.as_str());
                    self.release(cmd);
                } else {
                    self.held_ms[cmd.index()] = Some(age);
                }
            }
        }
    }

    pub fn is_key_down(&self, cmd: Command) -> bool {
        self.current & bit(cmd) != 0
    }

    /// Down this frame (or tapped during it) and up last frame
    pub fn is_key_pressed(&self, cmd: Command) -> bool {
        (self.current | self.latched) & !self.previous & bit(cmd) != 0
    }

    /// Snapshot for the game core
    pub fn frame_input(&self) -> FrameInput {
        let pressed = (self.current | self.latched) & !self.previous;
        FrameInput::from_bits(pressed, self.current)
    }

    /// Forget every held key
    pub fn clear(&mut self) {
        self.current = 0;
        self.previous = 0;
        self.latched = 0;
        self.held_ms = [None; Command::COUNT];
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn bit(cmd: Command) -> u16 {
    1 << cmd.index()
}
