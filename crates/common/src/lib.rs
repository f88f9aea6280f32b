//! Shared types used across the order composer crates.

mod types;

pub use types::OrderId;
