//! Falling-block puzzle rules engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package re-exports them as
//! `tetris_rules::{core, types}` and hosts the integration tests and benchmarks.

pub use tetris_rules_core as core;
pub use tetris_rules_types as types;
