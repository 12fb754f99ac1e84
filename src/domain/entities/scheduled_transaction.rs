//! Deferred bank-transaction entity.

use serde::{Deserialize, Serialize};

/// A bank transaction awaiting LLM classification at delivery time.
///
/// Built by the Monobank webhook handler from the parsed statement item and
/// the MCC-derived category, pushed through the task queue, and consumed by
/// the deferred-transaction delivery endpoint. `amount` is the absolute
/// decimal amount; the sign lives in `is_refund`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTransaction {
    #[serde(rename = "chatId")]
    pub chat_id: i64,

    pub mcc: i32,

    pub category: String,

    pub description: String,

    pub amount: f64,

    pub time: i64,

    #[serde(rename = "isRefund")]
    pub is_refund: bool,

    #[serde(rename = "accountId")]
    pub account_id: String,
}

impl ScheduledTransaction {
    /// One-line summary embedded into the classifier prompt.
    pub fn summary(&self) -> String {
        format!(
            "{{ mcc: {}, description: {}, category: {}, amount: {:.2} }}",
            self.mcc, self.description, self.category, self.amount
        )
    }
}
