//! API Key token generation
//!
//! Concrete [`TokenGenerator`] implementations: UUID v4 tokens and prefixed
//! random tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use uuid::Uuid;

use crate::domain::api_key::{TokenGenerationError, TokenGenerator};

/// Generates hyphenated UUID v4 tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl UuidTokenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> Result<String, TokenGenerationError> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Generates `prefix` + URL-safe base64 of random bytes
#[derive(Debug, Clone)]
pub struct RandomTokenGenerator {
    /// Prefix for all generated tokens (e.g., "ak_")
    prefix: String,
    /// Number of random bytes to generate
    token_bytes: usize,
}

impl RandomTokenGenerator {
    pub const DEFAULT_TOKEN_BYTES: usize = 32;
    pub const MAX_TOKEN_BYTES: usize = 1024;

    /// Create a new generator with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: Self::DEFAULT_TOKEN_BYTES,
        }
    }

    /// Set the number of random bytes
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn token_bytes(&self) -> usize {
        self.token_bytes
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new("")
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Result<String, TokenGenerationError> {
        if self.token_bytes == 0 {
            return Err(TokenGenerationError::misconfigured(
                "token_bytes must be greater than zero",
            ));
        }

        if self.token_bytes > Self::MAX_TOKEN_BYTES {
            return Err(TokenGenerationError::misconfigured(format!(
                "token_bytes must not exceed {}",
                Self::MAX_TOKEN_BYTES
            )));
        }

        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng()
            .try_fill_bytes(&mut random_bytes)
            .map_err(|e| TokenGenerationError::failed(e.to_string()))?;

        Ok(format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes)))
    }
}
