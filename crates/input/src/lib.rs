//! Pointer input (engine-facing).
//!
//! This crate is independent of any UI framework. A presentation layer feeds it raw
//! drag deltas and forwards the resulting [`crate::types::GameAction`]s to the
//! session, on the same task that applies every other action.

pub mod gesture;

pub use blockfall_types as types;

pub use gesture::GestureInterpreter;
