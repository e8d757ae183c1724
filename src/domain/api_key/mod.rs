//! API Key domain
//!
//! This module provides the API key entity, the builder that mints new keys,
//! and the ports for token generation and storage.

mod entity;
mod generator;
mod repository;

pub use entity::{ApiKey, ApiKeyBuilder};
pub use generator::{TokenGenerationError, TokenGenerator};
pub use repository::ApiKeyRepository;

#[cfg(test)]
pub use generator::MockTokenGenerator;
