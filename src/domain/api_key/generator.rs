//! Token generation port

use std::fmt::Debug;

use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors raised while minting a new API key token
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenGenerationError {
    #[error("generator produced an empty token")]
    EmptyToken,

    #[error("generator is misconfigured: {0}")]
    Misconfigured(String),

    #[error("generator failed: {0}")]
    Failed(String),
}

impl TokenGenerationError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self::Misconfigured(message.into())
    }
}

/// Source of opaque, unique API key tokens
#[cfg_attr(test, automock)]
pub trait TokenGenerator: Send + Sync + Debug {
    /// Produce a fresh token. Every call must yield a value never returned before.
    fn generate(&self) -> Result<String, TokenGenerationError>;
}
