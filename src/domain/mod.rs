//! Domain layer: pure logic with no I/O.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machines)
//! - `chart` - Chart extraction from free text and per-message presentation
//! - `conversation` - Transcript messages and input validation

pub mod chart;
pub mod conversation;
pub mod foundation;
