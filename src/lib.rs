//! API keys
//!
//! Credentials that authenticate programmatic access to a user's account:
//! - The `ApiKey` entity and the builder that mints new keys
//! - Pluggable token generation (UUID v4 or prefixed random tokens)
//! - A storage port with an in-memory implementation
//! - A service that creates keys and authenticates presented tokens

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{ApiKey, ApiKeyBuilder, DomainError, TokenGenerationError, TokenGenerator};
