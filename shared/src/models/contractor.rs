//! Contractor Model

use serde::{Deserialize, Serialize};

use crate::util;

/// Contractor entity (supplier / counterparty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

impl Contractor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: util::entry_id(),
            name: name.into(),
            created_at: util::now_millis(),
        }
    }
}

/// Create contractor payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractorCreate {
    pub name: String,
}
