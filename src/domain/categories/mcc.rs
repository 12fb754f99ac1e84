//! Merchant Category Code lookup.
//!
//! Maps ISO 18245 codes to their category group description. The webhook
//! handler feeds the group into the classifier prompt as a starting point;
//! an unknown code is surfaced to the operator rather than guessed.

/// Category lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("MCC code not found: {0}")]
    UnknownMcc(i32),
}

/// Resolve an MCC to its ISO 18245 range description.
pub fn category_from_mcc(code: i32) -> Result<&'static str, CategoryError> {
    let category = match code {
        1..=1499 => "Agricultural Services",
        1500..=2999 => "Contracted Services",
        3000..=3299 => "Airlines",
        3300..=3499 => "Car Rental",
        3500..=3999 => "Lodging",
        4000..=4799 => "Transportation Services",
        4800..=4999 => "Utility Services",
        5000..=5599 => "Retail Outlet Services",
        5600..=5699 => "Clothing Stores",
        5700..=7299 => "Miscellaneous Stores",
        7300..=7999 => "Business Services",
        8000..=8999 => "Professional Services and Membership Organizations",
        9000..=9999 => "Government Services",
        _ => return Err(CategoryError::UnknownMcc(code)),
    };
    Ok(category)
}
