//! Game state module - manages the complete game state
//!
//! Ties together the board, the piece bag and scoring. Handles the session
//! lifecycle (idle, playing, paused, game over), gravity, lock delay, line
//! clears and spawning.
//!
//! Time only advances through [`GameState::update`]. Every outcome the host
//! needs to react to (a lock, a game over) comes back as a [`StepOutcome`];
//! there are no callbacks.

use log::{debug, info};

use crate::board::Board;
use crate::config::{EngineConfig, LockResetPolicy};
use crate::pieces::{get_shape, spawn_position, try_rotate, PieceShape};
use crate::rng::{PieceBag, RandomSource, SimpleRng};
use crate::scoring::{
    drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score, soft_drop_interval_ms,
};
use crate::snapshot::{GameSnapshot, TimersSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_position(self.kind, self.rotation, self.x, self.y)
    }

    /// Whether one more row of gravity is possible.
    pub fn can_fall(&self, board: &Board) -> bool {
        board.is_valid_position(self.kind, self.rotation, self.x, self.y + 1)
    }
}

/// Final statistics of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOverRecord {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Time spent in the playing state, excluding pauses.
    pub played_ms: u64,
}

/// Result of advancing the game or applying a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Nothing changed: wrong session state, no active piece or the move was blocked.
    Ignored,
    /// The command or tick took effect.
    Applied,
    /// A piece locked and the next one spawned.
    Locked { lines_cleared: u32, points: u32 },
    /// The next piece could not spawn. Returned once per session.
    GameOver(GameOverRecord),
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, StepOutcome::Ignored)
    }

    pub fn game_over(&self) -> Option<GameOverRecord> {
        match self {
            StepOutcome::GameOver(record) => Some(*record),
            _ => None,
        }
    }

    fn from_applied(applied: bool) -> Self {
        if applied {
            StepOutcome::Applied
        } else {
            StepOutcome::Ignored
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    state: SessionState,
    active: Option<Tetromino>,
    next_piece: PieceKind,
    bag: PieceBag<R>,
    config: EngineConfig,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    is_locking: bool,
    /// Lock-delay restarts used by the current piece.
    lock_resets: u8,
    soft_drop: bool,
    played_ms: u64,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed and default tuning
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed), EngineConfig::default())
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create an idle game drawing pieces from `rng`.
    pub fn with_source(rng: R, config: EngineConfig) -> Self {
        let mut bag = PieceBag::with_source(rng);
        let next_piece = bag.next();

        Self {
            board: Board::new(),
            state: SessionState::Idle,
            active: None,
            next_piece,
            bag,
            config,
            score: 0,
            level: 1,
            lines: 0,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            is_locking: false,
            lock_resets: 0,
            soft_drop: false,
            played_ms: 0,
        }
    }

    /// Begin a fresh session. Only valid from idle or game over.
    ///
    /// Clears the board, counters and timers, discards the current bag and
    /// spawns the first piece. The soft-drop flag belongs to the caller and
    /// is left alone.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Idle | SessionState::GameOver => {}
            SessionState::Playing | SessionState::Paused => return,
        }

        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.is_locking = false;
        self.lock_resets = 0;
        self.played_ms = 0;

        self.bag.reset();
        self.next_piece = self.bag.next();
        self.state = SessionState::Playing;
        info!("session started, first piece {}", self.next_piece.as_str());

        // An empty board always has room for the first piece.
        self.spawn_piece();
    }

    /// Playing <-> Paused. No effect in any other state.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::Idle | SessionState::GameOver => return false,
        };
        debug!("session {}", self.state.as_str());
        true
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_locking(&self) -> bool {
        self.is_locking
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn played_ms(&self) -> u64 {
        self.played_ms
    }

    /// Set whether soft drop is held. Takes effect on the next update.
    pub fn set_soft_drop(&mut self, held: bool) {
        self.soft_drop = held;
    }

    /// Current gravity interval in milliseconds, soft drop included.
    pub fn drop_interval_ms(&self) -> u32 {
        let base = drop_interval_ms(self.level);
        if self.soft_drop {
            soft_drop_interval_ms(base, self.config.soft_drop_factor)
        } else {
            base
        }
    }

    /// Landing row of the active piece.
    pub fn ghost_y(&self) -> Option<i8> {
        self.active
            .map(|p| self.board.ghost_y(p.kind, p.rotation, p.x, p.y))
    }

    fn is_playing(&self) -> bool {
        self.state == SessionState::Playing && self.active.is_some()
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Gravity runs first, then the lock delay. A grounded piece that can fall
    /// again (because rows beneath it were cleared) stops locking and keeps
    /// its position; it falls on the next gravity step.
    pub fn update(&mut self, elapsed_ms: u32) -> StepOutcome {
        if !self.is_playing() {
            return StepOutcome::Ignored;
        }
        self.played_ms += u64::from(elapsed_ms);

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms >= self.drop_interval_ms() {
            self.drop_timer_ms = 0;
            self.step_down();
        }

        if self.is_locking {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
            let can_fall = self
                .active
                .is_some_and(|piece| piece.can_fall(&self.board));
            if can_fall {
                self.is_locking = false;
                self.lock_timer_ms = 0;
            } else if self.lock_timer_ms >= self.config.lock_delay_ms {
                return self.lock();
            }
        }

        StepOutcome::Applied
    }

    pub fn move_left(&mut self) -> bool {
        self.is_playing() && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_playing() && self.try_move(1, 0)
    }

    /// Move down one row. A blocked move puts the piece into lock delay.
    pub fn move_down(&mut self) -> bool {
        self.is_playing() && self.step_down()
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.is_playing() && self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.is_playing() && self.rotate(false)
    }

    /// Drop to the landing row, award 2 points per row and lock immediately.
    pub fn hard_drop(&mut self) -> StepOutcome {
        if !self.is_playing() {
            return StepOutcome::Ignored;
        }
        let Some(piece) = self.active else {
            return StepOutcome::Ignored;
        };

        let landing = self.board.ghost_y(piece.kind, piece.rotation, piece.x, piece.y);
        let rows = (landing - piece.y).max(0) as u32;
        self.score = self.score.saturating_add(hard_drop_score(rows));
        self.active = Some(Tetromino { y: landing, ..piece });
        self.lock()
    }

    /// Apply a command.
    pub fn apply_command(&mut self, command: GameCommand) -> StepOutcome {
        match command {
            GameCommand::Start => {
                let startable = matches!(self.state, SessionState::Idle | SessionState::GameOver);
                self.start();
                StepOutcome::from_applied(startable)
            }
            GameCommand::TogglePause => StepOutcome::from_applied(self.toggle_pause()),
            GameCommand::MoveLeft => StepOutcome::from_applied(self.move_left()),
            GameCommand::MoveRight => StepOutcome::from_applied(self.move_right()),
            GameCommand::MoveDown => StepOutcome::from_applied(self.move_down()),
            GameCommand::RotateCw => StepOutcome::from_applied(self.rotate_cw()),
            GameCommand::RotateCcw => StepOutcome::from_applied(self.rotate_ccw()),
            GameCommand::HardDrop => self.hard_drop(),
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let (nx, ny) = (piece.x + dx, piece.y + dy);
        if !self.board.is_valid_position(piece.kind, piece.rotation, nx, ny) {
            return false;
        }
        self.active = Some(Tetromino { x: nx, y: ny, ..piece });
        if self.is_locking && dy == 0 {
            self.reset_lock_timer();
        }
        true
    }

    /// Gravity step shared by `update` and `move_down`.
    fn step_down(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if !moved && !self.is_locking {
            self.is_locking = true;
            self.lock_timer_ms = 0;
        }
        moved
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let board = &self.board;
        let result = try_rotate(piece.kind, piece.rotation, piece.x, piece.y, clockwise, |rotation, x, y| {
            board.is_valid_position(piece.kind, rotation, x, y)
        });

        match result {
            Some(r) => {
                self.active = Some(Tetromino {
                    rotation: r.rotation,
                    x: r.x,
                    y: r.y,
                    ..piece
                });
                if self.is_locking {
                    self.reset_lock_timer();
                }
                true
            }
            None => false,
        }
    }

    fn reset_lock_timer(&mut self) {
        match self.config.lock_reset {
            LockResetPolicy::Unlimited => self.lock_timer_ms = 0,
            LockResetPolicy::Limited { max_resets } => {
                if self.lock_resets < max_resets {
                    self.lock_timer_ms = 0;
                    self.lock_resets += 1;
                }
            }
        }
    }

    /// Lock the active piece, clear rows, score, then spawn the next piece.
    fn lock(&mut self) -> StepOutcome {
        let Some(piece) = self.active.take() else {
            return StepOutcome::Ignored;
        };
        self.board.lock_piece(piece.kind, piece.rotation, piece.x, piece.y);
        self.is_locking = false;
        self.lock_timer_ms = 0;

        let cleared = self.board.clear_lines();
        let mut points = 0;
        if cleared > 0 {
            // Scored at the level in effect before these lines count.
            points = line_clear_score(cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines += cleared as u32;
            self.level = level_for_lines(self.lines);
            debug!(
                "cleared {} rows for {} points, level {}",
                cleared, points, self.level
            );
        }

        if self.spawn_piece() {
            StepOutcome::Locked {
                lines_cleared: cleared as u32,
                points,
            }
        } else {
            StepOutcome::GameOver(self.record())
        }
    }

    /// Promote the preview piece and draw a new one. Ends the session when
    /// the spawn placement is blocked.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.next_piece;
        self.next_piece = self.bag.next();
        self.drop_timer_ms = 0;
        self.lock_resets = 0;

        let piece = Tetromino::new(kind);
        if !piece.fits(&self.board) {
            self.active = None;
            self.state = SessionState::GameOver;
            info!(
                "game over: score {} level {} lines {}",
                self.score, self.level, self.lines
            );
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn record(&self) -> GameOverRecord {
        GameOverRecord {
            score: self.score,
            level: self.level,
            lines: self.lines,
            played_ms: self.played_ms,
        }
    }

    /// Write a render snapshot into `out` without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_id_grid(&mut out.board);
        out.active = self.active.map(Into::into);
        out.ghost_y = self.ghost_y();
        out.next = self.next_piece;
        out.state = self.state;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.soft_drop = self.soft_drop;
        out.timers = TimersSnapshot {
            drop_ms: self.drop_timer_ms,
            lock_ms: self.lock_timer_ms,
            locking: self.is_locking,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
