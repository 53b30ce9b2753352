//! Seatplan CLI support - schedule files, rendering and export
//!
//! Shared by the `seatplan` binary and its integration tests.

pub mod export;
pub mod loader;
pub mod output;
