//! Money conversion helpers
//!
//! All prices are stored as `i64` cents to keep debt sums exact.
//! Conversion to/from major units happens only at the edges (user
//! input, display formatting).

/// Convert major units to cents (rounded)
///
/// # Examples
///
/// ```
/// use shared::money::to_cents;
///
/// assert_eq!(to_cents(12.50), 1250);
/// assert_eq!(to_cents(0.01), 1);
/// assert_eq!(to_cents(100.00), 10000);
/// ```
pub fn to_cents(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

/// Convert cents to major units
///
/// # Examples
///
/// ```
/// use shared::money::to_major;
///
/// assert!((to_major(1250) - 12.50).abs() < 0.001);
/// assert!((to_major(1) - 0.01).abs() < 0.001);
/// ```
pub fn to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format cents as a two-decimal amount string
///
/// # Examples
///
/// ```
/// use shared::money::format_cents;
///
/// assert_eq!(format_cents(1250), "12.50");
/// assert_eq!(format_cents(0), "0.00");
/// ```
pub fn format_cents(cents: i64) -> String {
    format!("{:.2}", to_major(cents))
}
