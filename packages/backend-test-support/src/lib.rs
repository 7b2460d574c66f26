//! Test support for the tile game backend.
//!
//! Shared logging initialization, problem-details assertions and unique id
//! helpers for unit and integration tests.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
