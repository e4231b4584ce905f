//! Handsign Common Utilities
//!
//! Shared infrastructure for all Handsign crates:
//! - Error types and result aliases
//! - Frame clock utilities
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
