//! Shopping list → database transfer
//!
//! Validates a selected batch of shopping-list entries and moves them
//! into the database list. The batch is all-or-nothing: one incomplete
//! entry rejects the whole transfer and neither list changes.

use thiserror::Error;

use shared::models::Product;
use shared::{AppError, ErrorCode};

/// Transfer validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("no entries selected")]
    NoSelection,

    #[error("{} selected entr(ies) missing required fields", .0.len())]
    IncompleteFields(Vec<String>),
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::NoSelection => AppError::new(ErrorCode::NoSelection),
            TransferError::IncompleteFields(ids) => {
                AppError::new(ErrorCode::IncompleteFields).with_detail("ids", ids)
            }
        }
    }
}

/// A transferable entry has a name, an article, and a non-zero buy price
fn is_complete(product: &Product) -> bool {
    !product.name.trim().is_empty() && !product.article.trim().is_empty() && product.buy_price != 0
}

/// Move the selected entries from `shopping` to `database`
///
/// Validation order:
/// 1. the selection must resolve to at least one shopping-list entry;
/// 2. every selected entry must be complete.
///
/// On success the selected entries are appended to `database` with
/// their full state (contractor reference included), removed from
/// `shopping`, and the moved count is returned. On error both lists
/// are untouched.
pub fn transfer(
    shopping: &mut Vec<Product>,
    database: &mut Vec<Product>,
    selected_ids: &[String],
) -> Result<usize, TransferError> {
    let selected: Vec<&Product> = shopping
        .iter()
        .filter(|p| selected_ids.contains(&p.id))
        .collect();

    if selected.is_empty() {
        return Err(TransferError::NoSelection);
    }

    let incomplete: Vec<String> = selected
        .iter()
        .filter(|p| !is_complete(p))
        .map(|p| p.id.clone())
        .collect();
    if !incomplete.is_empty() {
        return Err(TransferError::IncompleteFields(incomplete));
    }

    let moved = selected.len();
    let (to_move, remaining): (Vec<Product>, Vec<Product>) = std::mem::take(shopping)
        .into_iter()
        .partition(|p| selected_ids.contains(&p.id));

    database.extend(to_move);
    *shopping = remaining;
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(name: &str, article: &str, buy_price: i64) -> Product {
        let mut p = Product::draft();
        p.name = name.to_string();
        p.article = article.to_string();
        p.buy_price = buy_price;
        p.quantity = 2;
        p
    }

    #[test]
    fn test_successful_transfer() {
        let item = complete("Filter", "F100", 1000);
        let id = item.id.clone();
        let mut shopping = vec![item, complete("Keep me", "K1", 500)];
        let mut database = Vec::new();

        let moved = transfer(&mut shopping, &mut database, &[id.clone()]).unwrap();

        assert_eq!(moved, 1);
        assert_eq!(shopping.len(), 1);
        assert_eq!(shopping[0].name, "Keep me");
        assert_eq!(database.len(), 1);
        assert_eq!(database[0].id, id);
        assert_eq!(database[0].buy_price, 1000);
        assert_eq!(database[0].quantity, 2);
    }

    #[test]
    fn test_transfer_preserves_contractor_reference() {
        let mut item = complete("Filter", "F100", 1000);
        item.contractor_id = Some("c-1".into());
        let id = item.id.clone();
        let mut shopping = vec![item];
        let mut database = Vec::new();

        transfer(&mut shopping, &mut database, &[id]).unwrap();
        assert_eq!(database[0].contractor_id.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let mut shopping = vec![complete("Filter", "F100", 1000)];
        let mut database = Vec::new();

        let err = transfer(&mut shopping, &mut database, &[]).unwrap_err();
        assert_eq!(err, TransferError::NoSelection);
        assert_eq!(shopping.len(), 1);
        assert!(database.is_empty());
    }

    #[test]
    fn test_selection_of_unknown_ids_is_rejected() {
        let mut shopping = vec![complete("Filter", "F100", 1000)];
        let mut database = Vec::new();

        let err = transfer(&mut shopping, &mut database, &["ghost".to_string()]).unwrap_err();
        assert_eq!(err, TransferError::NoSelection);
    }

    #[test]
    fn test_incomplete_entry_rejects_whole_batch() {
        let good = complete("Filter", "F100", 1000);
        let bad = complete("Pads", "", 500); // empty article
        let ids = vec![good.id.clone(), bad.id.clone()];
        let bad_id = bad.id.clone();

        let mut shopping = vec![good, bad];
        let mut database = Vec::new();
        let before = shopping.clone();

        let err = transfer(&mut shopping, &mut database, &ids).unwrap_err();
        assert_eq!(err, TransferError::IncompleteFields(vec![bad_id]));

        // Atomic: nothing moved, nothing reordered
        assert_eq!(shopping, before);
        assert!(database.is_empty());
    }

    #[test]
    fn test_zero_buy_price_is_incomplete() {
        let item = complete("Filter", "F100", 0);
        let id = item.id.clone();
        let mut shopping = vec![item];
        let mut database = Vec::new();

        let err = transfer(&mut shopping, &mut database, &[id.clone()]).unwrap_err();
        assert_eq!(err, TransferError::IncompleteFields(vec![id]));
    }

    #[test]
    fn test_whitespace_name_is_incomplete() {
        let item = complete("   ", "F100", 100);
        let id = item.id.clone();
        let mut shopping = vec![item];
        let mut database = Vec::new();

        assert!(transfer(&mut shopping, &mut database, &[id]).is_err());
    }

    #[test]
    fn test_unselected_incomplete_entries_do_not_block() {
        let good = complete("Filter", "F100", 1000);
        let draft = Product::draft(); // incomplete, but not selected
        let id = good.id.clone();

        let mut shopping = vec![good, draft];
        let mut database = Vec::new();

        let moved = transfer(&mut shopping, &mut database, &[id]).unwrap();
        assert_eq!(moved, 1);
        assert_eq!(shopping.len(), 1);
    }
}
