//! Shared building blocks for the message API crates.

pub mod types;
pub mod utils;
