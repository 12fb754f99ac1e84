//! Notification assembly.
//!
//! Composes the classification result, the deep link, and the shortened URL
//! into the final human-readable message. A shortening failure never fails
//! the notification: the error is appended as readable text and the message
//! is still delivered.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::services::shortener::UrlShortener;
use crate::domain::services::DeepLinkBuilder;
use crate::domain::Classification;

/// Substitute notification text when classification yields nothing. The
/// pipeline never drops a webhook without notifying a human.
pub const FALLBACK_TEXT: &str = "No response from AI";

/// Assembles notification text for classified expenses.
pub struct NotificationService {
    shortener: Arc<dyn UrlShortener>,
    links: DeepLinkBuilder,
}

impl NotificationService {
    pub fn new(shortener: Arc<dyn UrlShortener>) -> Self {
        Self {
            shortener,
            links: DeepLinkBuilder,
        }
    }

    /// Compose the notification body for a classification.
    ///
    /// The amount is displayed as its absolute value; `occurred_at` (bank
    /// transactions) dates the deep link. Identical inputs with a
    /// non-failing shortener produce byte-identical output.
    pub async fn assemble(
        &self,
        classification: &Classification,
        account: &str,
        occurred_at: Option<i64>,
    ) -> String {
        let amount = classification.amount.abs();

        let mut text = format!(
            "Category: {}\nSubcategory: {}\nAmount: {:.2}",
            classification.category, classification.subcategory, amount
        );

        let deep_link = match occurred_at {
            Some(timestamp) => self.links.create_dated(
                &classification.category,
                &classification.subcategory,
                account,
                amount,
                timestamp,
            ),
            None => self.links.create(
                &classification.category,
                &classification.subcategory,
                account,
                amount,
            ),
        };

        match self.shortener.shorten(&deep_link).await {
            Ok(url) => {
                info!(url = %url, "shortened deep link");
                text.push('\n');
                text.push_str(&url);
            }
            Err(err) => {
                warn!(error = %err, "could not shorten deep link");
                text.push_str("\nError shortening URL: ");
                text.push_str(&err.to_string());
            }
        }

        text
    }
}
