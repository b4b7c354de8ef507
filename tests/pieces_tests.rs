//! Pieces module tests - shapes, collision and SRS rotation

use blockfall::core::pieces::{get_kick_table, get_shape, kick_offsets};
use blockfall::core::{collides, fits, rotate_with_kicks, Board, Tetromino};
use blockfall::types::{Position, Rotation, TetrominoType};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    let north = get_shape(TetrominoType::I, Rotation::North);
    assert_eq!(north, [(0, 1), (1, 1), (2, 1), (3, 1)]);

    let east = get_shape(TetrominoType::I, Rotation::East);
    assert_eq!(east, [(2, 0), (2, 1), (2, 2), (2, 3)]);

    let south = get_shape(TetrominoType::I, Rotation::South);
    assert_eq!(south, [(0, 2), (1, 2), (2, 2), (3, 2)]);

    let west = get_shape(TetrominoType::I, Rotation::West);
    assert_eq!(west, [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_shapes() {
    // O piece is the same for all rotations
    let north = get_shape(TetrominoType::O, Rotation::North);
    assert_eq!(north, [(1, 0), (2, 0), (1, 1), (2, 1)]);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(get_shape(TetrominoType::O, rotation), north);
    }
}

#[test]
fn test_rotation_cycle_for_every_type() {
    for kind in TetrominoType::ALL {
        let piece = Tetromino::new(kind);
        let mut turned = piece;
        for _ in 0..4 {
            turned = turned.rotate();
        }
        assert_eq!(turned.rotation, Rotation::North);
        assert_eq!(turned.blocks(), piece.blocks(), "{:?}", kind);
    }
}

// ============== Collision Tests ==============

#[test]
fn test_collision_matches_bounds_and_overlap() {
    let board = Board::default()
        .with_cell(Position::new(4, 10), TetrominoType::S)
        .with_cell(Position::new(0, 19), TetrominoType::S);

    for kind in TetrominoType::ALL {
        for rotation_index in 0..4 {
            let piece = Tetromino::with_rotation(kind, Rotation::from_index(rotation_index));
            for y in -4..24 {
                for x in -4..14 {
                    let position = Position::new(x, y);
                    let expected_free = piece.cells_at(position).iter().all(|&cell| {
                        cell.x >= 0
                            && cell.x < 10
                            && cell.y >= 0
                            && cell.y < 20
                            && !board.is_occupied(cell)
                    });
                    assert_eq!(collides(&board, &piece, position), !expected_free);
                    assert_eq!(fits(&board, &piece, position), expected_free);
                }
            }
        }
    }
}

// ============== Kick Tests ==============

#[test]
fn test_kick_tables_shapes() {
    assert_eq!(get_kick_table(TetrominoType::O), &[[(0, 0); 5]; 4]);
    assert_eq!(get_kick_table(TetrominoType::T), get_kick_table(TetrominoType::Z));
    assert_ne!(get_kick_table(TetrominoType::I), get_kick_table(TetrominoType::T));
    assert_eq!(
        kick_offsets(TetrominoType::T, Rotation::North),
        &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]
    );
    assert_eq!(
        kick_offsets(TetrominoType::I, Rotation::North),
        &[(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]
    );
}

#[test]
fn test_t_kicks_off_right_wall() {
    let board = Board::default();
    // T West at x = 8 hugs the right wall (column 9 = x + 1); rotating to North
    // needs x + 2 = 10 in place, so the first kick (-1, 0) applies.
    let piece = Tetromino::with_rotation(TetrominoType::T, Rotation::West);
    let start = Position::new(8, 5);
    assert!(fits(&board, &piece, start));

    let (rotated, position) =
        rotate_with_kicks(piece, start, |p, at| fits(&board, &p, at)).unwrap();
    assert_eq!(rotated.rotation, Rotation::North);
    assert_eq!(position, Position::new(7, 5));
}

#[test]
fn test_i_kicks_off_floor() {
    let board = Board::default();
    // I North resting on the floor: row 19 (y + 1). In-place East needs rows y..y+3.
    let piece = Tetromino::new(TetrominoType::I);
    let start = Position::new(3, 18);

    let (rotated, position) =
        rotate_with_kicks(piece, start, |p, at| fits(&board, &p, at)).unwrap();
    assert_eq!(rotated.rotation, Rotation::East);
    // Kicks (0,0), (-2,0), (1,0), (-2,1) leave the floor; (1,-2) lifts it
    assert_eq!(position, Position::new(4, 16));
}
