//! Monobank webhook payload types.
//!
//! Only the slice of the statement schema the pipeline consumes; unknown
//! fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Substring marking a cancelled (refunded) transaction. The match is
/// case-sensitive; Monobank emits it capitalized.
const REFUND_MARKER: &str = "Скасування";

/// The complete Monobank webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StatementData,
}

/// The data field in the webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementData {
    pub account: String,
    #[serde(rename = "statementItem")]
    pub statement_item: StatementItem,
}

/// A single transaction in a Monobank statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementItem {
    #[serde(default)]
    pub id: String,
    pub time: i64,
    pub description: String,
    pub mcc: i32,
    #[serde(rename = "originalMcc", default)]
    pub original_mcc: i32,
    #[serde(default)]
    pub hold: bool,
    /// Amount in minor currency units; negative for debits.
    pub amount: i64,
    #[serde(rename = "operationAmount", default)]
    pub operation_amount: i64,
    #[serde(rename = "currencyCode", default)]
    pub currency_code: i32,
    #[serde(rename = "commissionRate", default)]
    pub commission_rate: i64,
    #[serde(rename = "cashbackAmount", default)]
    pub cashback_amount: i64,
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(rename = "receiptId", default)]
    pub receipt_id: String,
}

impl StatementItem {
    /// Absolute amount in major currency units.
    pub fn amount_decimal(&self) -> f64 {
        (self.amount.unsigned_abs() as f64) / 100.0
    }

    /// Whether the transaction is a refund, identified by the presence of
    /// "Скасування" (cancellation) in the description.
    pub fn is_refund(&self) -> bool {
        self.description.contains(REFUND_MARKER)
    }
}
