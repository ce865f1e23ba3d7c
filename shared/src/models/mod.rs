//! Data models
//!
//! Shared between the engine and its consumers. Entries are persisted
//! as JSON lists; all timestamps are `i64` Unix millis and all prices
//! are `i64` cents.

pub mod contractor;
pub mod photo;
pub mod product;
pub mod purchase;

// Re-exports
pub use contractor::*;
pub use photo::*;
pub use product::*;
pub use purchase::*;
