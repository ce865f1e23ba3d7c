//! redb-based persistent list store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `lists` | list key | JSON bytes | Full serialized product/contractor lists |
//! | `settlements` | contractor_id | `i64` | Debt settlement boundary (Unix millis) |
//!
//! Every mutating store operation rewrites the affected list in full;
//! there are no partial writes and no schema versioning. A payload
//! that fails to decode on load is treated as an empty list (the data
//! stays on disk until the next save overwrites it).
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()` returns,
//! the write survives power loss and the file is always in a
//! consistent state.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for stored lists: key = list name, value = JSON-serialized Vec<T>
const LISTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("lists");

/// Table for settlement boundaries: key = contractor_id, value = settled-at millis
const SETTLEMENTS_TABLE: TableDefinition<&str, i64> = TableDefinition::new("settlements");

/// List key for the shopping list (editable drafts)
pub const SHOPPING_LIST_KEY: &str = "shopping_list";

/// List key for the product database (completed entries)
pub const DATABASE_KEY: &str = "database";

/// List key for the contractor registry
pub const CONTRACTORS_KEY: &str = "contractors";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for shared::AppError {
    fn from(err: StorageError) -> Self {
        shared::AppError::storage(err.to_string())
    }
}

/// List storage backed by redb
#[derive(Clone)]
pub struct ListStorage {
    db: Arc<Database>,
}

impl ListStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LISTS_TABLE)?;
            let _ = write_txn.open_table(SETTLEMENTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== List Operations ==========

    /// Load a list by key
    ///
    /// An absent key yields an empty list. So does a payload that fails
    /// to decode: a malformed stored list is logged and discarded
    /// rather than bringing the whole store down.
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LISTS_TABLE)?;

        match table.get(key)? {
            Some(value) => match serde_json::from_slice(value.value()) {
                Ok(list) => Ok(list),
                Err(e) => {
                    tracing::warn!("Discarding undecodable list '{}': {}", key, e);
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    /// Save a list under a key, replacing any previous value
    pub fn save_list<T: Serialize>(&self, key: &str, list: &[T]) -> StorageResult<()> {
        let payload = serde_json::to_vec(list)?;
        self.save_raw_lists(&[(key, payload)])
    }

    /// Save several pre-serialized lists in a single committed transaction
    ///
    /// Used where multiple lists must move together (the transfer
    /// workflow rewrites the shopping list and the database list as one
    /// unit).
    pub fn save_raw_lists(&self, entries: &[(&str, Vec<u8>)]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LISTS_TABLE)?;
            for (key, payload) in entries {
                table.insert(*key, payload.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Serialize several lists and save them atomically
    pub fn save_lists<T: Serialize>(&self, entries: &[(&str, &[T])]) -> StorageResult<()> {
        let mut raw = Vec::with_capacity(entries.len());
        for (key, list) in entries {
            raw.push((*key, serde_json::to_vec(list)?));
        }
        self.save_raw_lists(&raw)
    }

    // ========== Settlement Operations ==========

    /// Record a settlement boundary for a contractor
    ///
    /// Purchases created at or before `at` stop counting toward the
    /// contractor's debt.
    pub fn mark_settled(&self, contractor_id: &str, at: i64) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTLEMENTS_TABLE)?;
            table.insert(contractor_id, at)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get the settlement boundary for a contractor, if any
    pub fn settled_at(&self, contractor_id: &str) -> StorageResult<Option<i64>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTLEMENTS_TABLE)?;
        Ok(table.get(contractor_id)?.map(|guard| guard.value()))
    }

    /// Remove a contractor's settlement boundary
    pub fn clear_settlement(&self, contractor_id: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTLEMENTS_TABLE)?;
            table.remove(contractor_id)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get all settlement boundaries keyed by contractor id
    pub fn all_settlements(&self) -> StorageResult<HashMap<String, i64>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTLEMENTS_TABLE)?;

        let mut settlements = HashMap::new();
        for result in table.iter()? {
            let (key, value) = result?;
            settlements.insert(key.value().to_string(), value.value());
        }

        Ok(settlements)
    }
}
