//! Classification result entity.

use serde::{Deserialize, Serialize};

/// Category/subcategory/amount triple produced by the classifier.
///
/// Absence of a classification (LLM unavailable or unparsable output) is an
/// expected outcome and is modeled as `Option<Classification>` at the port,
/// never as an error that aborts the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub subcategory: String,
    pub amount: f64,
}
