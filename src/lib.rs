//! # Expense Bot Library
//!
//! This crate provides a webhook-driven expense classification service:
//! - Telegram free-text messages and Monobank transaction webhooks in
//! - LLM classification into category / subcategory / amount
//! - MoneyWiz deep links, shortened through a fallback provider chain
//! - Notification delivery deferred through Google Cloud Tasks
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Value objects, category taxonomy, deep-link builder
//! - **Application Layer**: Ports and services (shortener chain, dispatcher,
//!   notification assembly, classification orchestration)
//! - **Infrastructure Layer**: HTTP clients for Telegram, OpenAI, Short.io,
//!   Bitly and Cloud Tasks
//! - **Presentation Layer**: Webhook handlers and response middleware
//!
//! ## Module Structure
//!
//! ```text
//! expense_bot/
//! +-- config/        Configuration management
//! +-- domain/        Value objects, categories, deep links
//! +-- application/   Ports and application services
//! +-- infrastructure/ External service clients
//! +-- presentation/  HTTP routes and middleware
//! +-- shared/        Common utilities (errors)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Ports and services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
