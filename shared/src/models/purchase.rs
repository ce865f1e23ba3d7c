//! Contractor purchase read model

use serde::{Deserialize, Serialize};

use super::Product;

/// Denormalized purchase record
///
/// Projection of a [`Product`] tagged with a contractor; never
/// persisted on its own. `total_price = quantity * buy_price` holds by
/// construction. `settled` marks purchases at or before the
/// contractor's settlement boundary: they stay in the history with
/// their totals intact but no longer count toward the debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorPurchase {
    pub id: String,
    pub contractor_id: String,
    pub product_name: String,
    pub article: String,
    pub quantity: u32,
    /// Price per unit in cents
    pub buy_price: i64,
    /// quantity * buy_price, in cents
    pub total_price: i64,
    pub created_at: i64,
    pub settled: bool,
}

impl ContractorPurchase {
    /// Project a tagged product into a purchase record
    ///
    /// Returns `None` for products without a contractor reference.
    pub fn from_product(product: &Product, settled: bool) -> Option<Self> {
        let contractor_id = product.contractor_id.clone()?;
        Some(Self {
            id: product.id.clone(),
            contractor_id,
            product_name: product.name.clone(),
            article: product.article.clone(),
            quantity: product.quantity,
            buy_price: product.buy_price,
            total_price: product.quantity as i64 * product.buy_price,
            created_at: product.created_at,
            settled,
        })
    }
}

/// Aggregated per-contractor statistics
///
/// Recomputed on demand from the current product set; no independent
/// lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractorStats {
    /// Count of all purchases, settled ones included
    pub total_products: usize,
    /// Sum of unsettled purchase totals, in cents
    pub total_debt: i64,
    /// Purchase history, newest first
    pub purchases: Vec<ContractorPurchase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price_from_product() {
        let mut p = Product::draft();
        p.contractor_id = Some("c-1".into());
        p.quantity = 3;
        p.buy_price = 1250;

        let purchase = ContractorPurchase::from_product(&p, false).unwrap();
        assert_eq!(purchase.total_price, 3750);
        assert_eq!(purchase.contractor_id, "c-1");
        assert!(!purchase.settled);
    }

    #[test]
    fn test_untagged_product_is_not_a_purchase() {
        let p = Product::draft();
        assert!(ContractorPurchase::from_product(&p, false).is_none());
    }
}
