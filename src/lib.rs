//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names so callers can write
//! `blockfall::{core,engine,input,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub mod cli;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
