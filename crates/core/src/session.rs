//! Session module - the game loop as a state machine
//!
//! A [`Session`] owns the board, the falling and queued pieces, the score and
//! every timer. Time only moves through the `elapsed_ms` argument of
//! [`Session::step`], so the whole loop is a function of
//! (state, intents, elapsed) and runs the same in tests as in a terminal.
//!
//! One step, in order:
//!
//! 1. While paused (or after game over / quit) only the allowed intents are
//!    applied and no time accumulates.
//! 2. Elapsed time is added to the gravity, sideways and soft-drop timers.
//! 3. If the previous piece locked, the queued piece spawns. A spawn that is
//!    not legal ends the game.
//! 4. Intents are applied in order.
//! 5. A held left/right repeats once its timer is strictly past the interval.
//! 6. A held soft drop repeats the same way.
//! 7. Gravity moves the piece down one row, or locks it when it cannot move.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::difficulty::{score_for_clear, Difficulty};
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Intent, RotationDirection, Rules};

/// Pending events kept until the driver takes them
pub const EVENT_CAPACITY: usize = 8;

/// Buffer returned by [`Session::take_events`]
pub type Events = ArrayVec<GameEvent, EVENT_CAPACITY>;

/// Notifications an integrator may surface (sound, flashes, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    PieceLocked { rows_cleared: u32 },
    RowsCleared(u32),
    GameOver { score: u32 },
}

/// Held horizontal movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn dx(self) -> i8 {
        match self {
            HorizontalDirection::Left => -1,
            HorizontalDirection::Right => 1,
            HorizontalDirection::None => 0,
        }
    }
}

/// Where the session is in its lifecycle; pause is tracked separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The last piece locked and the queued one spawns on the next step
    Spawning,
    Falling,
    GameOver,
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    board: Board,
    current: Option<Piece>,
    next: Piece,
    generator: PieceGenerator<R>,
    rules: Rules,
    score: u32,
    difficulty: Difficulty,
    fall_timer_ms: u32,
    sideways_timer_ms: u32,
    soft_drop_timer_ms: u32,
    horizontal: HorizontalDirection,
    soft_drop_held: bool,
    paused: bool,
    game_over: bool,
    quit_requested: bool,
    events: Events,
}

impl Session<StdRng> {
    /// Create a session whose piece sequence is fixed by `seed`
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self::with_generator(PieceGenerator::new(seed, rules.palette_size), rules)
    }
}

impl<R: Rng> Session<R> {
    /// Create a session drawing pieces from `rng`
    pub fn with_rng(rng: R, rules: Rules) -> Self {
        Self::with_generator(PieceGenerator::with_rng(rng, rules.palette_size), rules)
    }

    /// Create a session around an existing generator
    ///
    /// The queued piece is drawn and the first spawn is performed immediately.
    pub fn with_generator(mut generator: PieceGenerator<R>, rules: Rules) -> Self {
        let next = generator.draw();
        let mut session = Self {
            board: Board::new(),
            current: None,
            next,
            generator,
            rules,
            score: 0,
            difficulty: Difficulty::for_score(0, &rules),
            fall_timer_ms: 0,
            sideways_timer_ms: 0,
            soft_drop_timer_ms: 0,
            horizontal: HorizontalDirection::None,
            soft_drop_held: false,
            paused: false,
            game_over: false,
            quit_requested: false,
            events: Events::new(),
        };
        session.spawn();
        session
    }

    /// Start over on an empty board, continuing the same piece sequence
    pub fn restart(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = self.generator.draw();
        self.score = 0;
        self.difficulty = Difficulty::for_score(0, &self.rules);
        self.reset_timers();
        self.release_all();
        self.paused = false;
        self.game_over = false;
        self.quit_requested = false;
        self.events.clear();
        info!("session restarted");
        self.spawn();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup and tools
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.current.is_none() {
            Phase::Spawning
        } else {
            Phase::Falling
        }
    }

    /// Replace the falling piece, keeping it only if it fits
    ///
    /// Meant for scenario setup. Returns false (and changes nothing) when the
    /// piece is illegal or the game is over.
    pub fn place_current(&mut self, piece: Piece) -> bool {
        if self.game_over || !self.board.is_legal(&piece, 0, 0) {
            return false;
        }
        self.current = Some(piece);
        true
    }

    /// Replace the queued piece
    pub fn set_next(&mut self, piece: Piece) {
        self.next = piece;
    }

    /// Anchor row the falling piece would reach with a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.current?;
        Some(piece.y + self.board.drop_distance(&piece))
    }

    /// Advance the session by `elapsed_ms` after applying `intents` in order
    pub fn step(&mut self, intents: &[Intent], elapsed_ms: u32) {
        if self.game_over || self.quit_requested || self.paused {
            for &intent in intents {
                self.apply_intent(intent);
            }
            return;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        self.sideways_timer_ms = self.sideways_timer_ms.saturating_add(elapsed_ms);
        self.soft_drop_timer_ms = self.soft_drop_timer_ms.saturating_add(elapsed_ms);

        if self.current.is_none() && !self.spawn() {
            return;
        }

        for &intent in intents {
            self.apply_intent(intent);
        }
        if self.paused || self.game_over || self.quit_requested {
            return;
        }

        if self.horizontal != HorizontalDirection::None
            && self.sideways_timer_ms > self.rules.sideways_repeat_ms
        {
            self.try_move(self.horizontal.dx(), 0);
            self.sideways_timer_ms = 0;
        }

        if self.soft_drop_held && self.soft_drop_timer_ms > self.rules.soft_drop_repeat_ms {
            self.try_move(0, 1);
            self.soft_drop_timer_ms = 0;
        }

        if self.fall_timer_ms > self.difficulty.fall_interval_ms {
            if self.try_move(0, 1) {
                self.fall_timer_ms = 0;
            } else {
                self.lock();
            }
        }
    }

    /// Advance time without input
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.step(&[], elapsed_ms)
    }

    /// Apply one intent; returns whether it changed anything
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if self.game_over || self.quit_requested {
            if intent == Intent::Quit && !self.quit_requested {
                self.quit_requested = true;
                return true;
            }
            return false;
        }
        if self.paused && !intent.allowed_while_paused() {
            return false;
        }

        match intent {
            Intent::MoveLeftStart => self.start_horizontal(HorizontalDirection::Left),
            Intent::MoveRightStart => self.start_horizontal(HorizontalDirection::Right),
            Intent::MoveLeftStop => self.stop_horizontal(HorizontalDirection::Left),
            Intent::MoveRightStop => self.stop_horizontal(HorizontalDirection::Right),
            Intent::SoftDropStart => {
                self.soft_drop_held = true;
                self.soft_drop_timer_ms = 0;
                self.try_move(0, 1);
                true
            }
            Intent::SoftDropStop => std::mem::replace(&mut self.soft_drop_held, false),
            Intent::RotateCw => self.try_rotate(RotationDirection::Clockwise),
            Intent::RotateCcw => self.try_rotate(RotationDirection::CounterClockwise),
            Intent::HardDrop => self.hard_drop(),
            Intent::PauseToggle => {
                self.paused = !self.paused;
                if self.paused {
                    self.release_all();
                }
                debug!(paused = self.paused, "pause toggled");
                true
            }
            Intent::Quit => {
                self.quit_requested = true;
                info!(score = self.score, "quit requested");
                true
            }
        }
    }

    /// Take the events emitted since the last call
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.current.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = Some(PieceSnapshot::from(self.next));
        out.score = self.score;
        out.tier = self.difficulty.tier;
        out.fall_interval_ms = self.difficulty.fall_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Bring the queued piece in; false when it does not fit
    fn spawn(&mut self) -> bool {
        let piece = std::mem::replace(&mut self.next, self.generator.draw());
        self.fall_timer_ms = 0;
        if !self.board.is_legal(&piece, 0, 0) {
            self.current = None;
            self.game_over = true;
            self.release_all();
            info!(score = self.score, kind = ?piece.kind, "game over: spawn blocked");
            self.push_event(GameEvent::GameOver { score: self.score });
            return false;
        }
        trace!(kind = ?piece.kind, rotation = piece.rotation, "spawned");
        self.current = Some(piece);
        true
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        if !self.board.is_legal(&piece, dx, dy) {
            return false;
        }
        self.current = Some(piece.shifted(dx, dy));
        true
    }

    fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let turned = piece.rotated(direction);
        if !self.board.is_legal(&turned, 0, 0) {
            trace!(kind = ?piece.kind, ?direction, "rotation rejected");
            return false;
        }
        self.current = Some(turned);
        true
    }

    fn start_horizontal(&mut self, direction: HorizontalDirection) -> bool {
        self.horizontal = direction;
        self.sideways_timer_ms = 0;
        self.try_move(direction.dx(), 0);
        true
    }

    fn stop_horizontal(&mut self, direction: HorizontalDirection) -> bool {
        if self.horizontal != direction {
            return false;
        }
        self.horizontal = HorizontalDirection::None;
        true
    }

    /// Move straight to the lowest legal row; locking waits for gravity
    fn hard_drop(&mut self) -> bool {
        self.release_all();
        let Some(piece) = self.current else {
            return false;
        };
        let distance = self.board.drop_distance(&piece);
        self.current = Some(piece.shifted(0, distance));
        distance > 0
    }

    fn lock(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.board.merge(&piece);
        let cleared = self.board.clear_full_rows();
        self.score = self.score.saturating_add(score_for_clear(cleared));
        self.difficulty = Difficulty::for_score(self.score, &self.rules);

        let rows_cleared = cleared as u32;
        debug!(
            kind = ?piece.kind,
            x = piece.x,
            y = piece.y,
            rows_cleared,
            score = self.score,
            tier = self.difficulty.tier,
            "piece locked"
        );
        self.push_event(GameEvent::PieceLocked { rows_cleared });
        if rows_cleared > 0 {
            self.push_event(GameEvent::RowsCleared(rows_cleared));
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            // Oldest events go first when the driver is not draining them.
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn release_all(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.soft_drop_held = false;
    }

    fn reset_timers(&mut self) {
        self.fall_timer_ms = 0;
        self.sideways_timer_ms = 0;
        self.soft_drop_timer_ms = 0;
    }
}
