//! Shared types for the inventory engine
//!
//! Common types used across crates: entity models, error types,
//! money helpers, and utility functions.

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
