//! LLM classification port and prompt construction.

use async_trait::async_trait;

use crate::domain::categories::{categories_json, hints_json};
use crate::domain::{Classification, ScheduledTransaction};

/// Expense classification capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a prompt pair into a category/subcategory/amount triple.
    ///
    /// Returns `None` when the model is unavailable or its output is
    /// unparsable; callers substitute a fallback notification instead of
    /// failing the pipeline.
    async fn classify(&self, system_prompt: &str, user_prompt: &str) -> Option<Classification>;
}

/// Prompts for a free-text (cash) expense message.
pub fn cash_prompts(text: &str) -> (String, String) {
    (
        system_prompt("the input"),
        format!("Classify this input: {}", text),
    )
}

/// Prompts for a deferred bank transaction.
pub fn transaction_prompts(transaction: &ScheduledTransaction) -> (String, String) {
    (
        system_prompt("the bank transaction"),
        format!("Classify this bank transaction: {}", transaction.summary()),
    )
}

fn system_prompt(subject: &str) -> String {
    format!(
        "You are a data analyst. Your task is to classify {subject} into a category, \
         subcategory, and amount. You MUST ONLY use the categories and subcategories \
         provided below - do not invent new ones. If the input does not match any, use \
         'Other' for category and an empty string for subcategory. Output a single-line \
         JSON object with only these fields: category, subcategory, amount. Example of \
         the output: {{\"category\": \"Children\", \"subcategory\": \"Vocal\", \"amount\": 400.0}}. \
         Categories and subcategories: {categories} Hints: {hints} IMPORTANT: Do not add \
         any explanation or extra text. Only output the JSON object.",
        subject = subject,
        categories = categories_json(),
        hints = hints_json(),
    )
}
