//! API Key infrastructure implementations
//!
//! This module provides implementations for token generation,
//! in-memory storage and key management.

mod generator;
mod repository;
mod service;

pub use generator::{RandomTokenGenerator, UuidTokenGenerator};
pub use repository::InMemoryApiKeyRepository;
pub use service::ApiKeyService;
