//! MoneyWiz deep-link construction.
//!
//! Deep links open the expense entry screen pre-filled with the classified
//! fields. Amounts are always formatted as absolute two-decimal values; the
//! sign carries refund semantics elsewhere, not in the link.

use chrono::{TimeZone, Utc};
use chrono_tz::Europe::Kyiv;

/// Builds `moneywiz://` expense deep links.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepLinkBuilder;

impl DeepLinkBuilder {
    /// Build an expense link without a date (the app fills in "now").
    pub fn create(&self, category: &str, subcategory: &str, account: &str, amount: f64) -> String {
        format!(
            "moneywiz://expense?amount={:.2}&account={}&category={}&save=true",
            amount.abs(),
            account,
            Self::category_path(category, subcategory),
        )
    }

    /// Build an expense link carrying the transaction timestamp.
    ///
    /// The UTC epoch timestamp is rendered on the Kyiv calendar as
    /// `YYYY-MM-DD HH:MM:SS` with the separating space percent-encoded.
    /// An unrepresentable timestamp degrades to the undated link.
    pub fn create_dated(
        &self,
        category: &str,
        subcategory: &str,
        account: &str,
        amount: f64,
        timestamp: i64,
    ) -> String {
        let Some(utc) = Utc.timestamp_opt(timestamp, 0).single() else {
            return self.create(category, subcategory, account, amount);
        };
        let local = utc.with_timezone(&Kyiv);
        format!(
            "moneywiz://expense?amount={:.2}&account={}&category={}&date={}&save=true",
            amount.abs(),
            account,
            Self::category_path(category, subcategory),
            local.format("%Y-%m-%d%%20%H:%M:%S"),
        )
    }

    fn category_path(category: &str, subcategory: &str) -> String {
        if subcategory.is_empty() {
            category.to_string()
        } else {
            format!("{}/{}", category, subcategory)
        }
    }
}
