//! Shared test utilities for typeahead integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Time-dependent helpers assume the harness runs under
//! `#[tokio::test(start_paused = true)]`.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
