//! Keyboard input: a non-blocking key source plus the mapping from raw keys
//! to game inputs.

use crate::config::GameMode;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Something that can be polled for at most one key per tick.
pub trait KeySource {
    /// Next pending key as a lowercase char (space is `' '`), or `None`.
    /// Must not block.
    fn read_key(&mut self) -> io::Result<Option<char>>;

    /// Discard everything still buffered.
    fn flush(&mut self);
}

/// Input actions understood by the game states (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Q - stop the session.
    Quit,
    /// Space - start a life or flap.
    Space,
    /// 1/2/3 - pick a mode on the start screen.
    SelectMode(GameMode),
    /// R - back to the start screen after a crash.
    Restart,
    /// Any other key.
    Other,
}

impl GameInput {
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'q' => Self::Quit,
            ' ' => Self::Space,
            'r' => Self::Restart,
            c => GameMode::from_key(c).map_or(Self::Other, Self::SelectMode),
        }
    }
}

/// Reads keys from the real terminal through crossterm.
///
/// Expects raw mode to be enabled by the caller.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl CrosstermKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind == KeyEventKind::Release {
            return Ok(None);
        }
        let ch = match key.code {
            // Raw mode swallows SIGINT, so Ctrl+C quits like Q
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => 'q',
            KeyCode::Char(c) => c.to_ascii_lowercase(),
            KeyCode::Esc => 'q',
            _ => return Ok(None),
        };
        Ok(Some(ch))
    }

    fn flush(&mut self) {
        while let Ok(true) = event::poll(Duration::ZERO) {
            if event::read().is_err() {
                break;
            }
        }
    }
}

/// Never produces a key.
#[derive(Debug, Default)]
pub struct NullKeys;

impl KeySource for NullKeys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        Ok(None)
    }

    fn flush(&mut self) {}
}

/// Replays a fixed key sequence, one key per poll.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    pending: VecDeque<char>,
    /// Number of times `flush` was called.
    pub flushes: usize,
}

impl ScriptedKeys {
    pub fn new(keys: &str) -> Self {
        Self {
            pending: keys.chars().collect(),
            flushes: 0,
        }
    }

    pub fn push(&mut self, key: char) {
        self.pending.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        Ok(self.pending.pop_front())
    }

    fn flush(&mut self) {
        self.pending.clear();
        self.flushes += 1;
    }
}
