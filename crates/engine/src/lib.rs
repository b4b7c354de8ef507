//! Session orchestration
//!
//! Wraps the pure rules in `blockfall-core` with what a running game needs:
//!
//! - [`settings`]: `GameSettings` and its environment loader
//! - [`clock`]: pause-aware elapsed time
//! - [`session`]: `Session`, which owns the state, generator, combo streak and effect
//!   feed, and turns actions and ticks into new states
//! - [`place`]: placement planning for scripted players
//! - [`runtime`]: the tokio loop with a gravity task and a clock task publishing
//!   frames through a `watch` channel

pub mod clock;
pub mod place;
pub mod runtime;
pub mod session;
pub mod settings;

pub use clock::SessionClock;
pub use place::{choose_placement, plan_place, PlaceError, Placement, PlannedPlacement};
pub use runtime::SessionLoop;
pub use session::{Frame, Session};
pub use settings::GameSettings;
