//! Inventory engine
//!
//! Single-client shopping-list / product-database engine. All state is
//! a pair of product lists plus a contractor registry, persisted to an
//! embedded key-value store on every mutation; derived views are
//! recomputed from current state on demand.
//!
//! # Module structure
//!
//! ```text
//! inventory/src/
//! ├── config.rs      # env-driven configuration
//! ├── logger.rs      # tracing subscriber setup
//! ├── storage.rs     # redb-backed persistent list store
//! ├── store.rs       # in-memory state + save-on-mutate workflows
//! ├── transfer.rs    # shopping list → database transfer
//! ├── stats.rs       # per-contractor aggregation and debt
//! ├── views.rs       # filter / sort / date-grouping engines
//! └── validation.rs  # text field validation helpers
//! ```

pub mod config;
pub mod logger;
pub mod stats;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod validation;
pub mod views;

// Re-export public types
pub use config::Config;
pub use storage::{ListStorage, StorageError, StorageResult};
pub use store::InventoryStore;
pub use transfer::TransferError;
pub use views::{DateGroup, SortMode};

// Re-export unified error types from shared
pub use shared::{AppError, AppResult, ErrorCode};
