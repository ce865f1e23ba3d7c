//! Inventory store
//!
//! Owns the in-memory shopping list, product database, and contractor
//! registry, loaded once from storage at open. Every mutation updates
//! memory first and then saves the affected list(s) synchronously. If
//! a save fails the error is surfaced but the in-memory state stays
//! valid; the next successful save re-syncs it.

use std::collections::HashMap;

use shared::models::{
    Contractor, ContractorCreate, ContractorStats, Product, ProductUpdate, photo,
};
use shared::{AppError, AppResult, util};

use crate::config::Config;
use crate::stats;
use crate::storage::{CONTRACTORS_KEY, DATABASE_KEY, ListStorage, SHOPPING_LIST_KEY};
use crate::transfer;
use crate::validation::{MAX_ARTICLE_LEN, MAX_HINT_LEN, MAX_NAME_LEN, validate_required_text, validate_text};

pub struct InventoryStore {
    storage: ListStorage,
    shopping: Vec<Product>,
    database: Vec<Product>,
    contractors: Vec<Contractor>,
}

impl InventoryStore {
    /// Open the store file under the configured work dir
    pub fn open(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::storage(format!("cannot create work dir: {e}")))?;
        let storage = ListStorage::open(config.db_path())?;
        Self::with_storage(storage)
    }

    /// Build a store over an existing storage backend
    ///
    /// Storage is injected so tests can run against the in-memory
    /// backend.
    pub fn with_storage(storage: ListStorage) -> AppResult<Self> {
        let shopping: Vec<Product> = storage.load_list(SHOPPING_LIST_KEY)?;
        let database: Vec<Product> = storage.load_list(DATABASE_KEY)?;
        let contractors: Vec<Contractor> = storage.load_list(CONTRACTORS_KEY)?;

        tracing::info!(
            "Store loaded: {} shopping, {} database, {} contractors",
            shopping.len(),
            database.len(),
            contractors.len()
        );

        Ok(Self {
            storage,
            shopping,
            database,
            contractors,
        })
    }

    // ========== Read Accessors ==========

    pub fn shopping_list(&self) -> &[Product] {
        &self.shopping
    }

    pub fn database(&self) -> &[Product] {
        &self.database
    }

    pub fn contractors(&self) -> &[Contractor] {
        &self.contractors
    }

    // ========== Shopping List Operations ==========

    /// Append a blank draft entry to the shopping list
    pub fn add_product(&mut self) -> AppResult<Product> {
        let product = Product::draft();
        self.shopping.push(product.clone());
        self.persist_shopping()?;
        Ok(product)
    }

    /// Apply a partial update to a shopping-list entry
    ///
    /// The patch is validated as a whole before anything changes:
    /// field limits, quantity >= 1, non-negative prices, well-formed
    /// photo payloads, and a `contractor_id` that references an
    /// existing contractor.
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> AppResult<()> {
        self.validate_update(&update)?;

        let product = self
            .shopping
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Product").with_detail("id", id))?;

        product.apply(update);
        self.persist_shopping()
    }

    /// Remove an entry from the shopping list
    pub fn delete_product(&mut self, id: &str) -> AppResult<()> {
        let before = self.shopping.len();
        self.shopping.retain(|p| p.id != id);
        if self.shopping.len() == before {
            return Err(AppError::not_found("Product").with_detail("id", id));
        }
        self.persist_shopping()
    }

    /// Remove an entry from the database list
    pub fn delete_from_database(&mut self, id: &str) -> AppResult<()> {
        let before = self.database.len();
        self.database.retain(|p| p.id != id);
        if self.database.len() == before {
            return Err(AppError::not_found("Product").with_detail("id", id));
        }
        self.persist_database()
    }

    /// Move the selected entries into the database list
    ///
    /// Both lists are rewritten in a single storage transaction so a
    /// transferred entry can never exist in both (or neither) on disk.
    pub fn send_to_database(&mut self, selected_ids: &[String]) -> AppResult<usize> {
        let moved = transfer::transfer(&mut self.shopping, &mut self.database, selected_ids)?;

        self.storage.save_lists(&[
            (SHOPPING_LIST_KEY, self.shopping.as_slice()),
            (DATABASE_KEY, self.database.as_slice()),
        ])?;

        tracing::info!("Transferred {} entries to the database list", moved);
        Ok(moved)
    }

    // ========== Contractor Operations ==========

    pub fn add_contractor(&mut self, create: ContractorCreate) -> AppResult<Contractor> {
        validate_required_text(&create.name, "name", MAX_NAME_LEN)?;

        let contractor = Contractor::new(create.name.trim());
        self.contractors.push(contractor.clone());
        self.persist_contractors()?;
        Ok(contractor)
    }

    /// Delete a contractor, cascade-nulling references to it
    ///
    /// Products in either list that pointed at the contractor keep
    /// their data but lose the reference; the settlement boundary is
    /// dropped with the contractor.
    pub fn delete_contractor(&mut self, id: &str) -> AppResult<()> {
        let before = self.contractors.len();
        self.contractors.retain(|c| c.id != id);
        if self.contractors.len() == before {
            return Err(AppError::not_found("Contractor").with_detail("id", id));
        }

        let mut cleared = 0usize;
        for product in self.shopping.iter_mut().chain(self.database.iter_mut()) {
            if product.contractor_id.as_deref() == Some(id) {
                product.contractor_id = None;
                cleared += 1;
            }
        }
        if cleared > 0 {
            tracing::info!("Cleared contractor reference on {} product(s)", cleared);
        }

        self.storage.clear_settlement(id)?;
        self.persist_all()
    }

    /// Settle a contractor's outstanding debt
    ///
    /// Records a settlement boundary at the current instant: existing
    /// purchases stay in the history unchanged but stop counting
    /// toward the debt. Purchases made afterwards accrue fresh debt.
    pub fn reset_debt(&mut self, contractor_id: &str) -> AppResult<()> {
        self.require_contractor(contractor_id)?;
        self.storage.mark_settled(contractor_id, util::now_millis())?;
        tracing::info!("Debt settled for contractor {}", contractor_id);
        Ok(())
    }

    /// Stats for one contractor, computed over the database list
    pub fn contractor_stats(&self, contractor_id: &str) -> AppResult<ContractorStats> {
        self.require_contractor(contractor_id)?;
        let settled_before = self.storage.settled_at(contractor_id)?;
        Ok(stats::compute_stats(
            contractor_id,
            &self.database,
            settled_before,
        ))
    }

    /// Stats for every contractor, single pass over the database list
    ///
    /// Contractors without purchases get empty stats so the list view
    /// can render them uniformly.
    pub fn all_contractor_stats(&self) -> AppResult<HashMap<String, ContractorStats>> {
        let settlements = self.storage.all_settlements()?;
        let mut all = stats::stats_by_contractor(&self.database, &settlements);
        for contractor in &self.contractors {
            all.entry(contractor.id.clone()).or_default();
        }
        Ok(all)
    }

    // ========== Internals ==========

    fn require_contractor(&self, id: &str) -> AppResult<()> {
        if self.contractors.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(AppError::not_found("Contractor").with_detail("id", id))
        }
    }

    fn validate_update(&self, update: &ProductUpdate) -> AppResult<()> {
        if let Some(name) = &update.name {
            validate_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(article) = &update.article {
            validate_text(article, "article", MAX_ARTICLE_LEN)?;
        }
        if let Some(hint) = &update.hint {
            validate_text(hint, "hint", MAX_HINT_LEN)?;
        }
        if update.quantity == Some(0) {
            return Err(AppError::validation("quantity must be at least 1"));
        }
        if update.sell_price.is_some_and(|p| p < 0) || update.buy_price.is_some_and(|p| p < 0) {
            return Err(AppError::validation("prices must not be negative"));
        }
        if let Some(Some(payload)) = &update.photo {
            photo::validate_data_uri(payload).map_err(|e| AppError::validation(e.to_string()))?;
        }
        if let Some(Some(contractor_id)) = &update.contractor_id {
            self.require_contractor(contractor_id)?;
        }
        Ok(())
    }

    fn persist_shopping(&self) -> AppResult<()> {
        Ok(self.storage.save_list(SHOPPING_LIST_KEY, &self.shopping)?)
    }

    fn persist_database(&self) -> AppResult<()> {
        Ok(self.storage.save_list(DATABASE_KEY, &self.database)?)
    }

    fn persist_contractors(&self) -> AppResult<()> {
        Ok(self.storage.save_list(CONTRACTORS_KEY, &self.contractors)?)
    }

    /// Persist all three lists in one transaction
    fn persist_all(&self) -> AppResult<()> {
        let raw = vec![
            (SHOPPING_LIST_KEY, to_vec(&self.shopping)?),
            (DATABASE_KEY, to_vec(&self.database)?),
            (CONTRACTORS_KEY, to_vec(&self.contractors)?),
        ];
        Ok(self.storage.save_raw_lists(&raw)?)
    }
}

fn to_vec<T: serde::Serialize>(list: &[T]) -> AppResult<Vec<u8>> {
    serde_json::to_vec(list).map_err(|e| crate::storage::StorageError::from(e).into())
}
