//! Per-contractor aggregation
//!
//! Projects contractor-tagged products into purchase records and
//! reduces them to stats (purchase count, outstanding debt, history).
//! Everything here is a pure function of the current product set plus
//! the settlement boundaries; nothing is cached.

use chrono::{Locale, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use shared::models::{ContractorPurchase, ContractorStats, Product};

use crate::views::{day_label, local_day};

/// A calendar-day bucket of purchases with its day total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseGroup {
    pub date: NaiveDate,
    pub label: String,
    /// Sum of purchase totals for the day, in cents
    pub total: i64,
    pub purchases: Vec<ContractorPurchase>,
}

/// Purchase history for one contractor, newest first
///
/// `settled_before` marks purchases created at or before the boundary
/// as settled; they keep their totals but carry no debt.
pub fn purchases_for(
    contractor_id: &str,
    products: &[Product],
    settled_before: Option<i64>,
) -> Vec<ContractorPurchase> {
    let mut purchases: Vec<ContractorPurchase> = products
        .iter()
        .filter(|p| p.contractor_id.as_deref() == Some(contractor_id))
        .filter_map(|p| {
            let settled = settled_before.is_some_and(|at| p.created_at <= at);
            ContractorPurchase::from_product(p, settled)
        })
        .collect();

    purchases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    purchases
}

/// Compute stats for one contractor
///
/// `total_products` counts every purchase, settled or not; settlement
/// only zeroes the debt contribution.
pub fn compute_stats(
    contractor_id: &str,
    products: &[Product],
    settled_before: Option<i64>,
) -> ContractorStats {
    let purchases = purchases_for(contractor_id, products, settled_before);
    reduce(purchases)
}

/// Compute stats for every referenced contractor in a single pass
///
/// Avoids one full product scan per contractor when rendering the
/// contractor list view.
pub fn stats_by_contractor(
    products: &[Product],
    settlements: &HashMap<String, i64>,
) -> HashMap<String, ContractorStats> {
    let mut grouped: HashMap<String, Vec<ContractorPurchase>> = HashMap::new();

    for product in products {
        let Some(contractor_id) = product.contractor_id.as_deref() else {
            continue;
        };
        let settled = settlements
            .get(contractor_id)
            .is_some_and(|at| product.created_at <= *at);
        if let Some(purchase) = ContractorPurchase::from_product(product, settled) {
            grouped
                .entry(contractor_id.to_string())
                .or_default()
                .push(purchase);
        }
    }

    grouped
        .into_iter()
        .map(|(contractor_id, mut purchases)| {
            purchases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            (contractor_id, reduce(purchases))
        })
        .collect()
}

/// Group a purchase history by calendar day with per-day totals
///
/// Group order follows the history order (newest day first).
pub fn group_purchases_by_date(
    purchases: &[ContractorPurchase],
    tz: Tz,
    locale: Locale,
) -> Vec<PurchaseGroup> {
    let mut groups: Vec<PurchaseGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for purchase in purchases {
        let date = local_day(purchase.created_at, tz);
        match index.get(&date) {
            Some(&i) => {
                groups[i].total += purchase.total_price;
                groups[i].purchases.push(purchase.clone());
            }
            None => {
                index.insert(date, groups.len());
                groups.push(PurchaseGroup {
                    date,
                    label: day_label(date, locale),
                    total: purchase.total_price,
                    purchases: vec![purchase.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

fn reduce(purchases: Vec<ContractorPurchase>) -> ContractorStats {
    let total_debt = purchases
        .iter()
        .filter(|p| !p.settled)
        .map(|p| p.total_price)
        .sum();
    ContractorStats {
        total_products: purchases.len(),
        total_debt,
        purchases,
    }
}
