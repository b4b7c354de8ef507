//! Placement planning
//!
//! Translates a target `(x, rotation)` into the discrete actions that take the
//! current piece there, and picks a target with a simple board heuristic. Used by
//! scripted players such as the headless simulator.

use blockfall_core::{movement, Board, GameState};
use blockfall_types::{Direction, GameAction, Position, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked | PlaceError::XOutOfBounds | PlaceError::XBlocked => {
                "invalid_place"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is not playable",
        }
    }
}

/// Target origin column and rotation for the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub rotation: Rotation,
}

/// A placement together with how to reach it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPlacement {
    pub placement: Placement,
    /// Rotations and moves, ending with `HardDrop`
    pub actions: Vec<GameAction>,
    /// State with the piece resting at its landing row, not yet locked
    pub landed: GameState,
}

/// Plan the actions that put the current piece at `target` and drop it
pub fn plan_place(state: &GameState, target: Placement) -> Result<PlannedPlacement, PlaceError> {
    if !state.is_playable() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(piece) = state.current_piece() else {
        return Err(PlaceError::NotPlayable);
    };

    let mut actions = Vec::new();
    let mut current = state.clone();

    // Clockwise only: 0..=3 quarter turns
    let turns = (target.rotation.index() + 4 - piece.rotation.index()) % 4;
    for _ in 0..turns {
        current = movement::try_rotate(&current).ok_or(PlaceError::RotationBlocked)?;
        actions.push(GameAction::Rotate);
    }

    let rotated = current.current_piece().ok_or(PlaceError::NotPlayable)?;
    let blocks = rotated.blocks();
    let min_dx = blocks.iter().map(|b| b.x).min().unwrap_or(0);
    let max_dx = blocks.iter().map(|b| b.x).max().unwrap_or(0);
    if target.x + min_dx < 0 || target.x + max_dx >= state.board().width() {
        return Err(PlaceError::XOutOfBounds);
    }

    let x = current.current_position().map(|p| p.x).unwrap_or(target.x);
    let (direction, action) = if target.x > x {
        (Direction::Right, GameAction::MoveRight)
    } else {
        (Direction::Left, GameAction::MoveLeft)
    };
    for _ in 0..(target.x - x).abs() {
        current = movement::try_move(&current, direction).ok_or(PlaceError::XBlocked)?;
        actions.push(action);
    }

    let landed = movement::hard_drop(&current).ok_or(PlaceError::NotPlayable)?;
    actions.push(GameAction::HardDrop);

    Ok(PlannedPlacement {
        placement: target,
        actions,
        landed,
    })
}

/// Board features scored by [`choose_placement`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub lines_cleared: u32,
    pub aggregate_height: i32,
    pub holes: i32,
    pub bumpiness: i32,
}

impl BoardFeatures {
    fn score(&self) -> i64 {
        760 * self.lines_cleared as i64
            - 510 * self.aggregate_height as i64
            - 356 * self.holes as i64
            - 184 * self.bumpiness as i64
    }
}

/// Measure the board left behind after locking `landed`
pub fn evaluate(landed: &GameState) -> Option<BoardFeatures> {
    let piece = landed.current_piece()?;
    let position = landed.current_position()?;
    let (board, lines_cleared) = landed.board().lock_piece(&piece, position).clear_lines();

    let heights = column_heights(&board);
    let aggregate_height = heights.iter().sum();
    let bumpiness = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();
    let holes = count_holes(&board, &heights);

    Some(BoardFeatures {
        lines_cleared,
        aggregate_height,
        holes,
        bumpiness,
    })
}

fn column_heights(board: &Board) -> Vec<i32> {
    (0..board.width())
        .map(|x| {
            (0..board.height())
                .find(|&y| board.is_occupied(Position::new(x, y)))
                .map_or(0, |top| board.height() - top)
        })
        .collect()
}

fn count_holes(board: &Board, heights: &[i32]) -> i32 {
    heights
        .iter()
        .enumerate()
        .map(|(x, &h)| {
            let top = board.height() - h;
            (top..board.height())
                .filter(|&y| !board.is_occupied(Position::new(x as i32, y)))
                .count() as i32
        })
        .sum()
}

/// Best reachable placement for the current piece, or None if nothing is reachable
///
/// Candidates are scanned rotation-major, left to right; the first best score wins,
/// so the choice is deterministic.
pub fn choose_placement(state: &GameState) -> Option<PlannedPlacement> {
    let width = state.board().width();
    let mut best: Option<(i64, PlannedPlacement)> = None;

    for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
        for x in -3..width {
            let Ok(plan) = plan_place(state, Placement { x, rotation }) else {
                continue;
            };
            let Some(features) = evaluate(&plan.landed) else {
                continue;
            };
            let score = features.score();
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, plan));
            }
        }
    }

    best.map(|(_, plan)| plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::{movement, PieceGenerator, Play, Tetromino};
    use blockfall_types::TetrominoType;

    fn spawned(kind: TetrominoType, board: Board) -> GameState {
        GameState::new(board, Tetromino::new(kind), Tetromino::new(TetrominoType::O))
    }

    #[test]
    fn place_rejected_when_paused() {
        let state = GameState::start(&mut PieceGenerator::new(1));
        let paused = movement::pause(&state).unwrap();
        let err = plan_place(
            &paused,
            Placement {
                x: 3,
                rotation: Rotation::North,
            },
        )
        .unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
        assert_eq!(err.code(), "not_playable");
    }

    #[test]
    fn place_rejected_when_x_out_of_bounds() {
        let state = spawned(TetrominoType::T, Board::default());
        let err = plan_place(
            &state,
            Placement {
                x: -50,
                rotation: Rotation::North,
            },
        )
        .unwrap_err();
        assert_eq!(err, PlaceError::XOutOfBounds);
    }

    #[test]
    fn place_rejected_when_x_blocked_by_collision() {
        // A wall in column 1 blocks any leftward travel of a T spawned at x = 3
        let mut board = Board::default();
        for y in 0..20 {
            board = board.with_cell(Position::new(1, y), TetrominoType::I);
        }
        let state = spawned(TetrominoType::T, board);
        let err = plan_place(
            &state,
            Placement {
                x: 0,
                rotation: Rotation::North,
            },
        )
        .unwrap_err();
        assert_eq!(err, PlaceError::XBlocked);
        assert_eq!(err.message(), "could not move to target x due to collision");
    }

    #[test]
    fn place_builds_action_sequence() {
        let state = spawned(TetrominoType::J, Board::default());
        let plan = plan_place(
            &state,
            Placement {
                x: 0,
                rotation: Rotation::South,
            },
        )
        .unwrap();

        assert_eq!(
            plan.actions,
            vec![
                GameAction::Rotate,
                GameAction::Rotate,
                GameAction::MoveLeft,
                GameAction::MoveLeft,
                GameAction::MoveLeft,
                GameAction::HardDrop,
            ]
        );
        assert!(matches!(
            plan.landed.play(),
            Play::Active { position, .. } if position.x == 0
        ));
    }

    #[test]
    fn evaluate_counts_holes_and_lines() {
        // Row 19 full except columns 0 and 1; an O at x = -1 plugs the gap
        let mut board = Board::default();
        for x in 2..10 {
            board = board.with_cell(Position::new(x, 19), TetrominoType::S);
        }
        let state = GameState::from_parts(
            board,
            Play::Active {
                piece: Tetromino::new(TetrominoType::O),
                position: Position::new(-1, 18),
            },
            Tetromino::new(TetrominoType::T),
            0,
            0,
            false,
        );
        let features = evaluate(&state).unwrap();
        assert_eq!(features.lines_cleared, 1);
        assert_eq!(features.holes, 0);
        // Leftover O half: columns 0 and 1, one row each
        assert_eq!(features.aggregate_height, 2);
    }

    #[test]
    fn choose_placement_takes_the_clear() {
        // Bottom row open only at column 9; a vertical I should drop there
        let mut board = Board::default();
        for x in 0..9 {
            board = board.with_cell(Position::new(x, 19), TetrominoType::Z);
        }
        let state = spawned(TetrominoType::I, board);
        let plan = choose_placement(&state).unwrap();
        let features = evaluate(&plan.landed).unwrap();
        assert_eq!(features.lines_cleared, 1);
        assert_eq!(plan.actions.last(), Some(&GameAction::HardDrop));
    }
}
