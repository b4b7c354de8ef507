//! Game session - owns everything one game needs and dispatches actions and ticks
//!
//! The session is synchronous. It keeps the current immutable [`GameState`] and
//! replaces it wholesale whenever an action or tick produces a new one.

use std::time::Duration;

use tokio::time::Instant;

use blockfall_core::{
    fall_delay_ms, lock, movement, plan_feedback, should_lock, Board, GameSnapshot, GameState,
    LockEvent, PieceGenerator, SnapshotError, VisualEffectBurst, VisualEffectFeed,
};
use blockfall_types::{Direction, GameAction};

use crate::clock::SessionClock;
use crate::settings::GameSettings;

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: GameState,
    pub ghost_y: Option<i32>,
    pub elapsed_ms: u64,
    pub combo_streak: u32,
    /// Pending effect burst and its sequence id
    pub effect: Option<(u64, VisualEffectBurst)>,
}

#[derive(Debug, Clone)]
pub struct Session {
    settings: GameSettings,
    generator: PieceGenerator,
    state: GameState,
    combo_streak: u32,
    feed: VisualEffectFeed,
    clock: SessionClock,
    elapsed_ms: u64,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl Session {
    /// Create a session with its first game dealt but the clock not yet running
    pub fn new(settings: GameSettings) -> Self {
        let mut generator = PieceGenerator::new(settings.seed);
        let state = GameState::start_on(
            Board::new(settings.board_width, settings.board_height),
            &mut generator,
        );

        Self {
            settings,
            generator,
            state,
            combo_streak: 0,
            feed: VisualEffectFeed::new(),
            clock: SessionClock::new(),
            elapsed_ms: 0,
            last_event: None,
        }
    }

    /// Resume a session from a snapshot
    ///
    /// Without a saved generator the piece sequence continues from `settings.seed`.
    pub fn restore(
        settings: GameSettings,
        snapshot: &GameSnapshot,
        now: Instant,
    ) -> Result<Self, SnapshotError> {
        let state = snapshot.restore()?;
        let generator = snapshot
            .restore_generator()?
            .unwrap_or_else(|| PieceGenerator::new(settings.seed));

        let mut clock = SessionClock::new();
        clock.start(now);
        if state.is_paused() {
            clock.pause(now);
        }

        Ok(Self {
            settings,
            generator,
            state,
            combo_streak: 0,
            feed: VisualEffectFeed::new(),
            clock,
            elapsed_ms: 0,
            last_event: None,
        })
    }

    /// Start a new game: fresh board, fresh bag, clock from zero
    pub fn start(&mut self, now: Instant) {
        self.state = GameState::start_on(
            Board::new(self.settings.board_width, self.settings.board_height),
            &mut self.generator,
        );
        self.combo_streak = 0;
        self.feed.clear();
        self.clock.start(now);
        self.elapsed_ms = 0;
        self.last_event = None;
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn combo_streak(&self) -> u32 {
        self.combo_streak
    }

    /// True while gravity and the clock should advance
    pub fn is_running(&self) -> bool {
        self.clock.is_started() && self.state.is_playable()
    }

    /// Apply a discrete action; returns true if the state changed
    pub fn apply(&mut self, action: GameAction, now: Instant) -> bool {
        let next = match action {
            GameAction::MoveLeft => movement::try_move(&self.state, Direction::Left),
            GameAction::MoveRight => movement::try_move(&self.state, Direction::Right),
            GameAction::MoveDown => movement::try_move(&self.state, Direction::Down),
            GameAction::Rotate => movement::try_rotate(&self.state),
            GameAction::HardDrop => {
                let Some(dropped) = movement::hard_drop(&self.state) else {
                    return false;
                };
                self.state = dropped;
                return self.lock_current();
            }
            GameAction::Pause => {
                let paused = movement::pause(&self.state);
                if paused.is_some() {
                    self.clock.pause(now);
                    self.elapsed_ms = self.clock.elapsed_ms(now);
                }
                paused
            }
            GameAction::Resume => {
                let resumed = movement::resume(&self.state);
                if resumed.is_some() {
                    self.clock.resume(now);
                }
                resumed
            }
        };

        match next {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// One gravity step: fall one row, or lock when resting
    ///
    /// Returns false when nothing happened (paused, over, or not started).
    pub fn gravity_tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if let Some(state) = movement::try_move(&self.state, Direction::Down) {
            self.state = state;
            return true;
        }
        should_lock(&self.state) && self.lock_current()
    }

    /// Refresh the elapsed time; returns it in milliseconds
    pub fn clock_tick(&mut self, now: Instant) -> u64 {
        if self.clock.is_started() && !self.state.is_game_over() {
            self.elapsed_ms = self.clock.elapsed_ms(now);
        }
        self.elapsed_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Delay before the next gravity step at the current level
    pub fn fall_delay(&self) -> Duration {
        Duration::from_millis(fall_delay_ms(self.state.level(), self.settings.difficulty))
    }

    pub fn ghost_y(&self) -> Option<i32> {
        self.state.ghost_y()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            state: self.state.clone(),
            ghost_y: self.state.ghost_y(),
            elapsed_ms: self.elapsed_ms,
            combo_streak: self.combo_streak,
            effect: self
                .feed
                .pending()
                .map(|(sequence, burst)| (sequence, burst.clone())),
        }
    }

    /// Take the last lock event, leaving None behind
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn pending_effect(&self) -> Option<(u64, &VisualEffectBurst)> {
        self.feed.pending()
    }

    pub fn acknowledge_effect(&mut self, sequence: u64) -> bool {
        self.feed.acknowledge(sequence)
    }

    /// Persisted form of the current game, including the generator
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, Some(&self.generator))
    }

    fn lock_current(&mut self) -> bool {
        let Some((state, event)) = lock(&self.state, &mut self.generator) else {
            return false;
        };
        self.state = state;

        let (streak, burst) = plan_feedback(self.combo_streak, event.lines_cleared);
        self.combo_streak = streak;
        if let Some(burst) = burst {
            self.feed.publish(burst);
        }
        self.last_event = Some(event);
        true
    }
}
