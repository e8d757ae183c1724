//! Domain layer - Core entities, ports and errors

pub mod api_key;
pub mod error;

pub use api_key::{ApiKey, ApiKeyBuilder, ApiKeyRepository, TokenGenerationError, TokenGenerator};
pub use error::DomainError;
