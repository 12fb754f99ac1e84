//! Domain Services
//!
//! Pure domain logic with no I/O.

pub mod deep_link;

pub use deep_link::DeepLinkBuilder;
