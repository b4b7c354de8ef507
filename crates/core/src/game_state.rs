//! Game state module - the immutable value every rule maps to a new value
//!
//! A [`GameState`] is never mutated in place by the rules: movement and locking
//! take a state by reference and return a fresh one. The current piece is carried by
//! [`Play`], which is either an active piece with its position or the terminal
//! `Finished` marker.

use crate::board::Board;
use crate::collision::collides;
use crate::ghost;
use crate::pieces::Tetromino;
use crate::rng::PieceGenerator;
use crate::scoring::level_for_lines;
use crate::types::Position;

/// Whether a piece is in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Play {
    /// A falling piece; `position` is collision-free on the state's board
    Active { piece: Tetromino, position: Position },
    /// Game over: the last spawn collided, nothing is in play
    Finished,
}

impl Play {
    pub fn is_active(&self) -> bool {
        matches!(self, Play::Active { .. })
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) play: Play,
    pub(crate) next_piece: Tetromino,
    pub(crate) score: u32,
    pub(crate) lines_cleared: u32,
    pub(crate) paused: bool,
}

impl GameState {
    /// Start a fresh game on a default board
    ///
    /// Resets the generator's bag, then draws the current and the next piece.
    pub fn start(generator: &mut PieceGenerator) -> Self {
        Self::start_on(Board::default(), generator)
    }

    /// Start a fresh game on the given (usually empty) board
    pub fn start_on(board: Board, generator: &mut PieceGenerator) -> Self {
        generator.reset();
        let current = generator.next();
        let next = generator.next();
        Self::new(board, current, next)
    }

    /// Build a state with `current` spawned at the board's spawn position
    ///
    /// If `current` collides there, the state is `Finished` straight away.
    pub fn new(board: Board, current: Tetromino, next: Tetromino) -> Self {
        let play = spawn(&board, current);
        Self {
            board,
            play,
            next_piece: next,
            score: 0,
            lines_cleared: 0,
            paused: false,
        }
    }

    /// Assemble a state from raw parts without spawning
    ///
    /// The caller is responsible for `play` being collision-free on `board`.
    pub fn from_parts(
        board: Board,
        play: Play,
        next_piece: Tetromino,
        score: u32,
        lines_cleared: u32,
        paused: bool,
    ) -> Self {
        Self {
            board,
            play,
            next_piece,
            score,
            lines_cleared,
            paused,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn play(&self) -> Play {
        self.play
    }

    /// The falling piece, if the game is not over
    pub fn current_piece(&self) -> Option<Tetromino> {
        match self.play {
            Play::Active { piece, .. } => Some(piece),
            Play::Finished => None,
        }
    }

    pub fn current_position(&self) -> Option<Position> {
        match self.play {
            Play::Active { position, .. } => Some(position),
            Play::Finished => None,
        }
    }

    pub fn next_piece(&self) -> Tetromino {
        self.next_piece
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Current level, derived from total cleared rows
    pub fn level(&self) -> u32 {
        level_for_lines(self.lines_cleared)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.play, Play::Finished)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True when actions and gravity may change the state
    pub fn is_playable(&self) -> bool {
        !self.paused && self.play.is_active()
    }

    /// Landing row of the current piece, None once the game is over
    pub fn ghost_y(&self) -> Option<i32> {
        match self.play {
            Play::Active { piece, position } => Some(ghost::ghost_y(&self.board, &piece, position)),
            Play::Finished => None,
        }
    }

    /// Copy of this state with the piece moved to `position`
    pub(crate) fn with_piece(&self, piece: Tetromino, position: Position) -> Self {
        Self {
            play: Play::Active { piece, position },
            ..self.clone()
        }
    }

    pub(crate) fn with_paused(&self, paused: bool) -> Self {
        Self {
            paused,
            ..self.clone()
        }
    }
}

/// Place `piece` at the spawn position, or finish the game if it does not fit
pub(crate) fn spawn(board: &Board, piece: Tetromino) -> Play {
    let position = board.spawn_position();
    if collides(board, &piece, position) {
        Play::Finished
    } else {
        Play::Active { piece, position }
    }
}
