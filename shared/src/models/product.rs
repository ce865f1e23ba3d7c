//! Product Model

use serde::{Deserialize, Serialize};

use crate::util;

/// Product entity
///
/// Lives in either the shopping list (editable draft) or the database
/// list (completed entry). `contractor_id` is a soft reference to a
/// [`Contractor`](super::Contractor); the store validates it at write
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// SKU code
    pub article: String,
    /// Inline data-URI image payload
    pub photo: Option<String>,
    /// Free-text note
    pub hint: String,
    pub quantity: u32,
    /// Price in cents
    pub sell_price: i64,
    /// Price in cents
    pub buy_price: i64,
    pub created_at: i64,
    /// Contractor reference (String ID)
    pub contractor_id: Option<String>,
}

impl Product {
    /// Create a blank shopping-list draft with a fresh ID
    pub fn draft() -> Self {
        Self {
            id: util::entry_id(),
            name: String::new(),
            article: String::new(),
            photo: None,
            hint: String::new(),
            quantity: 1,
            sell_price: 0,
            buy_price: 0,
            created_at: util::now_millis(),
            contractor_id: None,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(article) = update.article {
            self.article = article;
        }
        if let Some(photo) = update.photo {
            self.photo = photo;
        }
        if let Some(hint) = update.hint {
            self.hint = hint;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(sell_price) = update.sell_price {
            self.sell_price = sell_price;
        }
        if let Some(buy_price) = update.buy_price {
            self.buy_price = buy_price;
        }
        if let Some(contractor_id) = update.contractor_id {
            self.contractor_id = contractor_id;
        }
    }
}

/// Update product payload
///
/// `None` leaves a field unchanged. For the two clearable fields
/// (`photo`, `contractor_id`) the outer `Option` is the patch presence
/// and the inner one the stored value, so `Some(None)` clears.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub article: Option<String>,
    pub photo: Option<Option<String>>,
    pub hint: Option<String>,
    pub quantity: Option<u32>,
    pub sell_price: Option<i64>,
    pub buy_price: Option<i64>,
    pub contractor_id: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let p = Product::draft();
        assert_eq!(p.quantity, 1);
        assert_eq!(p.buy_price, 0);
        assert!(p.name.is_empty());
        assert!(p.contractor_id.is_none());
        assert!(!p.id.is_empty());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut p = Product::draft();
        p.apply(ProductUpdate {
            name: Some("Oil filter".into()),
            buy_price: Some(1050),
            ..Default::default()
        });
        assert_eq!(p.name, "Oil filter");
        assert_eq!(p.buy_price, 1050);
        // Untouched fields keep their values
        assert_eq!(p.quantity, 1);
    }

    #[test]
    fn test_apply_clears_contractor() {
        let mut p = Product::draft();
        p.contractor_id = Some("c-1".into());
        p.apply(ProductUpdate {
            contractor_id: Some(None),
            ..Default::default()
        });
        assert!(p.contractor_id.is_none());
    }
}
