//! DAS/ARR input handler for terminal environments.
//!
//! Left and right move once on press, again when the DAS delay runs out, then
//! at the ARR rate while held. The soft-drop key steps down once on press and
//! is otherwise tracked as a held flag for the engine. Terminals that do not
//! emit key release events are handled with a timeout.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::{is_soft_drop_key, map_key};
use crate::types::{GameCommand, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn command(self) -> Option<GameCommand> {
        match self {
            HorizontalDirection::Left => Some(GameCommand::MoveLeft),
            HorizontalDirection::Right => Some(GameCommand::MoveRight),
            HorizontalDirection::None => None,
        }
    }

    fn of(code: KeyCode) -> Self {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => HorizontalDirection::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => HorizontalDirection::Right,
            _ => HorizontalDirection::None,
        }
    }
}

/// Commands produced by one handler update.
pub type RepeatedCommands = ArrayVec<GameCommand, 32>;

/// Tracks held keys for auto-repeat and soft drop.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    soft_drop_held: bool,
    last_key_time: Instant,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// Without release events, a short timeout keeps a single tap from turning
// into a held key.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            soft_drop_held: false,
            last_key_time: Instant::now(),
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether soft drop is currently held; feed this to the engine each frame.
    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Dispatch a key event by kind. Returns the command a press triggers.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<GameCommand> {
        match key.kind {
            KeyEventKind::Release => {
                self.handle_key_release(key.code);
                None
            }
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_key_press(key),
        }
    }

    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameCommand> {
        if is_soft_drop_key(key.code) {
            self.last_key_time = Instant::now();
            if self.soft_drop_held {
                return None;
            }
            // Step right away; gravity at the soft-drop rate takes over after.
            self.soft_drop_held = true;
            return Some(GameCommand::MoveDown);
        }

        let direction = HorizontalDirection::of(key.code);
        if direction == HorizontalDirection::None {
            return map_key(key);
        }

        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            // Held key repeating at the terminal level; DAS/ARR owns repeats.
            return None;
        }
        self.horizontal = direction;
        self.das_timer = 0;
        self.arr_accumulator = 0;
        direction.command()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if is_soft_drop_key(code) {
            self.soft_drop_held = false;
            return;
        }
        let direction = HorizontalDirection::of(code);
        if direction != HorizontalDirection::None && self.horizontal == direction {
            self.release_horizontal();
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance the repeat timers and collect repeated moves.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatedCommands {
        let mut commands = RepeatedCommands::new();

        let since_last_key = self.last_key_time.elapsed().as_millis();
        if since_last_key > u128::from(self.key_release_timeout_ms) {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            self.soft_drop_held = false;
        }

        let Some(command) = self.horizontal.command() else {
            return commands;
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_delay {
            return commands;
        }

        if prev_das < self.das_delay {
            // DAS expired this frame: one move now, ARR runs on what is left.
            let _ = commands.try_push(command);
            self.arr_accumulator = self.das_timer - self.das_delay;
        } else {
            self.arr_accumulator = self.arr_accumulator.saturating_add(elapsed_ms);
        }

        while self.arr_accumulator >= self.arr_rate {
            if commands.try_push(command).is_err() {
                self.arr_accumulator = 0;
                break;
            }
            self.arr_accumulator -= self.arr_rate;
        }

        commands
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.soft_drop_held = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
