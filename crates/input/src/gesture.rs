//! Drag gesture interpreter.
//!
//! Turns raw pointer drag deltas into discrete [`GameAction`]s. One gesture runs
//! from `drag_started` to `drag_ended`:
//!
//! - The first delta decides whether the gesture is horizontal
//!   (`|dx| > 1.5 * |dy|`). The decision sticks until the gesture ends, so a
//!   zero first delta makes the gesture vertical.
//! - Horizontal gestures emit one `MoveLeft`/`MoveRight` per 50px of travel.
//! - Other gestures collect downward travel and resolve on release: a quick flick
//!   over a quarter of the board is a `HardDrop`, a slower or shorter pull over
//!   50px is a `MoveDown`.
//!
//! Every call emits at most one action.

use std::time::{Duration, Instant};

use crate::types::{
    GameAction, DRAG_STEP_PX, HARD_DROP_HEIGHT_FRACTION, HARD_DROP_MAX_GESTURE_MS,
    HORIZONTAL_BIAS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Undecided,
    Horizontal,
    Vertical,
}

/// Per-drag accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureState {
    horizontal: f32,
    downward: f32,
    started_at: Instant,
    axis: Axis,
    board_height_px: f32,
}

/// Idle until a drag starts, Dragging until it ends
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    drag: Option<GestureState>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a gesture; `board_height_px` scales the hard-drop threshold
    pub fn drag_started(&mut self, now: Instant, board_height_px: f32) {
        self.drag = Some(GestureState {
            horizontal: 0.0,
            downward: 0.0,
            started_at: now,
            axis: Axis::Undecided,
            board_height_px: board_height_px.max(0.0),
        });
    }

    /// Feed one pointer delta (pixels, y grows downward)
    pub fn dragged(&mut self, dx: f32, dy: f32) -> Option<GameAction> {
        let drag = self.drag.as_mut()?;

        if drag.axis == Axis::Undecided {
            drag.axis = if dx.abs() > HORIZONTAL_BIAS * dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
        }

        match drag.axis {
            Axis::Horizontal => {
                drag.horizontal += dx;
                if drag.horizontal.abs() > DRAG_STEP_PX {
                    let action = if drag.horizontal > 0.0 {
                        GameAction::MoveRight
                    } else {
                        GameAction::MoveLeft
                    };
                    drag.horizontal = 0.0;
                    return Some(action);
                }
                None
            }
            Axis::Vertical | Axis::Undecided => {
                if dy > 0.0 {
                    drag.downward += dy;
                }
                None
            }
        }
    }

    /// Finish the gesture and return to idle
    pub fn drag_ended(&mut self, now: Instant) -> Option<GameAction> {
        let drag = self.drag.take()?;
        if drag.axis == Axis::Horizontal {
            return None;
        }

        let duration = now.saturating_duration_since(drag.started_at);
        let flick_distance = drag.board_height_px * HARD_DROP_HEIGHT_FRACTION;

        if drag.downward > flick_distance
            && duration < Duration::from_millis(HARD_DROP_MAX_GESTURE_MS)
        {
            Some(GameAction::HardDrop)
        } else if drag.downward > DRAG_STEP_PX {
            Some(GameAction::MoveDown)
        } else {
            None
        }
    }

    /// Abandon the current gesture without emitting anything
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}
