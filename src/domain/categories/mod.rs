//! Expense category taxonomy.
//!
//! A static category -> subcategories map plus per-category hints, rendered
//! to JSON for embedding into classifier prompts, and an MCC -> category
//! group lookup for bank transactions.

mod mcc;

pub use mcc::{category_from_mcc, CategoryError};

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Category -> subcategories. BTreeMap keeps the JSON rendering stable.
static CATEGORIES: Lazy<BTreeMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    BTreeMap::from([
        ("Huge", vec!["Car", "Dwelling"]),
        ("Bills", vec!["Utilities", "Cellurar", "Internet", "Other"]),
        ("Devices", vec![]),
        ("Gifts", vec![]),
        (
            "Car",
            vec![
                "Accessories",
                "Insurance",
                "Garage",
                "Fuel",
                "Rent",
                "Maintenance",
                "Parking",
                "Other",
            ],
        ),
        (
            "Children",
            vec!["Vocal", "Things", "Hospital", "Kindergarten", "Other"],
        ),
        (
            "Business",
            vec![
                "Broker",
                "Taxes",
                "Travel",
                "Accounts",
                "Software",
                "Translations",
                "Accountability",
                "Salary",
                "Design",
                "Lawyer",
                "Fee",
                "Finances",
                "Other",
            ],
        ),
        ("Help", vec!["Donation", "Family", "Other"]),
        (
            "Transport",
            vec!["Subway", "Taxi", "Bus", "Plane", "Train", "Other"],
        ),
        (
            "Activities",
            vec!["Swimming", "Cinema", "Activities", "Sport", "Other", "F1"],
        ),
        ("Food", vec!["Shop", "Alcohol", "Outdoors", "Other"]),
        ("Things", vec!["Clothes", "Shoes", "Accessories", "Other"]),
        ("Education", vec!["Language", "Other"]),
        (
            "Health",
            vec!["Mental", "Dentist", "Vision", "Pharmacy", "Medicine", "Other"],
        ),
        ("House", vec!["Furniture", "Maintenance", "Other"]),
        (
            "Multimedia",
            vec![
                "Applications",
                "Books",
                "Movies",
                "Music",
                "Storage",
                "Games",
                "Other",
            ],
        ),
        ("Travel", vec!["Permission", "Hotel", "Excursion", "Other"]),
        ("Waste", vec![]),
        ("Other", vec![]),
    ])
});

/// Category -> classification hint. Not every category needs one; hints
/// exist where the LLM tends to miscategorize.
static HINTS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "Food",
            "Supermarkets and groceries go to Shop; restaurants and cafes go to Outdoors",
        ),
        (
            "Transport",
            "Bolt and Uber rides are Taxi; fuel purchases belong to Car/Fuel",
        ),
        (
            "Huge",
            "Only major one-off purchases such as a car or real estate",
        ),
        (
            "Business",
            "Anything related to the company: taxes, accountant, software subscriptions for work",
        ),
        (
            "Waste",
            "Unrecognized bank fees and amounts written off without a clear purpose",
        ),
    ])
});

/// Taxonomy rendered as indented JSON for the classifier prompt.
pub fn categories_json() -> String {
    serde_json::to_string_pretty(&*CATEGORIES).unwrap_or_else(|_| "{}".into())
}

/// Hints rendered as indented JSON for the classifier prompt.
pub fn hints_json() -> String {
    serde_json::to_string_pretty(&*HINTS).unwrap_or_else(|_| "{}".into())
}
