//! View engines: filter, sort, calendar-day grouping
//!
//! Pure functions over product slices. None of them mutate the input;
//! each render recomputes its view from current state.

use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use shared::models::Product;

/// Sort mode for product list views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

/// A calendar-day bucket of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    /// Locale-formatted day label, e.g. "5 March 2026"
    pub label: String,
    pub products: Vec<Product>,
}

/// Filter by case-insensitive substring match on name OR article
///
/// An empty or whitespace-only query returns the input unchanged.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let query = query.trim();
    if query.is_empty() {
        return products.to_vec();
    }

    let query = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query) || p.article.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Produce a new, stably sorted product sequence
///
/// Date modes compare `created_at`, price modes compare `buy_price`,
/// name modes compare case-insensitively. Equal keys keep their input
/// order.
pub fn sort_products(products: &[Product], mode: SortMode) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match mode {
        SortMode::DateDesc => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::DateAsc => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortMode::NameAsc => sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortMode::NameDesc => sorted.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase())),
        SortMode::PriceAsc => sorted.sort_by(|a, b| a.buy_price.cmp(&b.buy_price)),
        SortMode::PriceDesc => sorted.sort_by(|a, b| b.buy_price.cmp(&a.buy_price)),
    }
    sorted
}

/// Calendar day of a millisecond timestamp in the display timezone
pub(crate) fn local_day(millis: i64, tz: Tz) -> NaiveDate {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&tz)
        .date_naive()
}

/// Locale-formatted day label
pub(crate) fn day_label(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%-d %B %Y", locale).to_string()
}

/// Group products by the calendar date of `created_at`
///
/// Groups are ordered by date, descending unless the active sort is
/// `DateAsc`. Within a group, products keep the order they arrived in
/// (i.e. whatever [`sort_products`] produced).
pub fn group_by_date(
    products: &[Product],
    mode: SortMode,
    tz: Tz,
    locale: Locale,
) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for product in products {
        let date = local_day(product.created_at, tz);
        match index.get(&date) {
            Some(&i) => groups[i].products.push(product.clone()),
            None => {
                index.insert(date, groups.len());
                groups.push(DateGroup {
                    date,
                    label: day_label(date, locale),
                    products: vec![product.clone()],
                });
            }
        }
    }

    if mode == SortMode::DateAsc {
        groups.sort_by(|a, b| a.date.cmp(&b.date));
    } else {
        groups.sort_by(|a, b| b.date.cmp(&a.date));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, article: &str, buy_price: i64, created_at: i64) -> Product {
        let mut p = Product::draft();
        p.name = name.to_string();
        p.article = article.to_string();
        p.buy_price = buy_price;
        p.created_at = created_at;
        p
    }

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    // 2026-03-05 00:00:00 UTC
    const T0: i64 = 1_772_668_800_000;

    #[test]
    fn test_filter_empty_query_is_identity() {
        let products = vec![product("Filter", "F100", 10, T0)];
        assert_eq!(filter_products(&products, ""), products);
        assert_eq!(filter_products(&products, "   "), products);
    }

    #[test]
    fn test_filter_matches_name_or_article() {
        let products = vec![
            product("Oil Filter", "F100", 10, T0),
            product("Brake Pads", "BP-7", 20, T0),
            product("Coolant", "fil-9", 30, T0),
        ];

        let by_name = filter_products(&products, "filter");
        assert_eq!(by_name.len(), 2); // name "Oil Filter" + article "fil-9"

        let by_article = filter_products(&products, "bp-7");
        assert_eq!(by_article.len(), 1);
        assert_eq!(by_article[0].name, "Brake Pads");
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let products = vec![
            product("A", "1", 10, T0),
            product("B", "2", 20, T0),
        ];
        let _ = filter_products(&products, "a");
        assert_eq!(products[0].name, "A");
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn test_sort_by_date() {
        let products = vec![
            product("Old", "1", 10, T0),
            product("New", "2", 20, T0 + DAY_MS),
        ];

        let desc = sort_products(&products, SortMode::DateDesc);
        assert_eq!(desc[0].name, "New");

        let asc = sort_products(&products, SortMode::DateAsc);
        assert_eq!(asc[0].name, "Old");
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let products = vec![
            product("banana", "1", 10, T0),
            product("Apple", "2", 20, T0),
        ];
        let sorted = sort_products(&products, SortMode::NameAsc);
        assert_eq!(sorted[0].name, "Apple");
    }

    #[test]
    fn test_sort_by_price() {
        let products = vec![
            product("Dear", "1", 500, T0),
            product("Cheap", "2", 5, T0),
        ];
        let sorted = sort_products(&products, SortMode::PriceAsc);
        assert_eq!(sorted[0].name, "Cheap");
        let sorted = sort_products(&products, SortMode::PriceDesc);
        assert_eq!(sorted[0].name, "Dear");
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let products = vec![
            product("First", "1", 100, T0),
            product("Second", "2", 100, T0),
            product("Third", "3", 100, T0),
        ];
        let sorted = sort_products(&products, SortMode::PriceAsc);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);

        let sorted = sort_products(&products, SortMode::PriceDesc);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let products = vec![
            product("B", "1", 20, T0),
            product("A", "2", 10, T0),
        ];
        let _ = sort_products(&products, SortMode::NameAsc);
        assert_eq!(products[0].name, "B");
    }

    #[test]
    fn test_group_same_day_different_times() {
        // Two entries on the same calendar day, three hours apart
        let products = vec![
            product("Morning", "1", 10, T0 + 8 * 60 * 60 * 1000),
            product("Noon", "2", 20, T0 + 11 * 60 * 60 * 1000),
            product("Yesterday", "3", 30, T0 - DAY_MS),
        ];

        let groups = group_by_date(&products, SortMode::DateDesc, Tz::UTC, Locale::en_US);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].products.len(), 2);
        assert_eq!(groups[0].products[0].name, "Morning");
        assert_eq!(groups[1].products[0].name, "Yesterday");
    }

    #[test]
    fn test_group_order_follows_date_sort_direction() {
        let products = vec![
            product("Old", "1", 10, T0 - DAY_MS),
            product("New", "2", 20, T0),
        ];

        let desc = group_by_date(&products, SortMode::DateDesc, Tz::UTC, Locale::en_US);
        assert!(desc[0].date > desc[1].date);

        let asc = group_by_date(&products, SortMode::DateAsc, Tz::UTC, Locale::en_US);
        assert!(asc[0].date < asc[1].date);

        // Non-date sorts keep the default descending group order
        let by_name = group_by_date(&products, SortMode::NameAsc, Tz::UTC, Locale::en_US);
        assert!(by_name[0].date > by_name[1].date);
    }

    #[test]
    fn test_group_respects_display_timezone() {
        // 2026-03-05 23:30 UTC is already 2026-03-06 in Moscow (UTC+3)
        let products = vec![product("Late", "1", 10, T0 + 23 * 60 * 60 * 1000 + 30 * 60 * 1000)];

        let utc = group_by_date(&products, SortMode::DateDesc, Tz::UTC, Locale::en_US);
        let msk = group_by_date(
            &products,
            SortMode::DateDesc,
            chrono_tz::Europe::Moscow,
            Locale::en_US,
        );
        assert_eq!(utc[0].date.succ_opt().unwrap(), msk[0].date);
    }

    #[test]
    fn test_group_label_is_localized() {
        let products = vec![product("X", "1", 10, T0)];
        let groups = group_by_date(&products, SortMode::DateDesc, Tz::UTC, Locale::en_US);
        assert_eq!(groups[0].label, "5 March 2026");
    }
}
