//! API Key service
//!
//! Provides high-level operations for API key management.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::api_key::{ApiKey, ApiKeyBuilder, ApiKeyRepository, TokenGenerator};
use crate::domain::DomainError;

use super::generator::UuidTokenGenerator;

/// API Key service for managing API keys
#[derive(Debug)]
pub struct ApiKeyService<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
    generator: Box<dyn TokenGenerator>,
}

impl<R: ApiKeyRepository> ApiKeyService<R> {
    /// Create a new API key service
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: Box::new(UuidTokenGenerator::new()),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: Box<dyn TokenGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Build a new API key for a user and persist it
    pub async fn create(
        &self,
        user_id: u64,
        alias: impl Into<String>,
    ) -> Result<ApiKey, DomainError> {
        let alias = alias.into();
        info!("Creating API key: user_id={}, alias={}", user_id, alias);

        let api_key = ApiKeyBuilder::new()
            .user_id(user_id)
            .alias(alias)
            .build(self.generator.as_ref())?;

        let created = self.repository.create(api_key).await?;

        info!(
            "API key created: id={:?}, user_id={}",
            created.id(),
            created.user_id()
        );

        Ok(created)
    }

    /// Get an API key by ID
    pub async fn get(&self, id: u64) -> Result<Option<ApiKey>, DomainError> {
        self.repository.get(id).await
    }

    /// Resolve a presented token to its key, recording the usage on success
    pub async fn authenticate(&self, token: &str) -> Result<Option<ApiKey>, DomainError> {
        if token.is_empty() {
            debug!("Rejecting empty API key token");
            return Ok(None);
        }

        let Some(mut api_key) = self.repository.get_by_token(token).await? else {
            debug!("No API key matches the presented token");
            return Ok(None);
        };

        if !constant_time_compare(api_key.token(), token) {
            debug!("API key token comparison failed");
            return Ok(None);
        }

        let Some(id) = api_key.id() else {
            return Err(DomainError::internal(
                "Repository returned an API key without an ID",
            ));
        };

        let now = Utc::now();

        match self.repository.record_usage(id, now).await {
            Ok(()) => api_key.record_usage(now),
            Err(DomainError::NotFound { .. }) => {
                debug!("API key removed during authentication: id={}", id);
                return Ok(None);
            }
            Err(e) => warn!("Failed to record API key usage: {}", e),
        }

        debug!("API key authenticated: id={}, user_id={}", id, api_key.user_id());

        Ok(Some(api_key))
    }

    /// Change the alias of an existing key
    pub async fn rename(&self, id: u64, alias: impl Into<String>) -> Result<ApiKey, DomainError> {
        info!("Renaming API key: id={}", id);

        let mut api_key = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))?;

        api_key.set_alias(alias, Utc::now());
        self.repository.update(&api_key).await
    }

    /// List the keys owned by a user
    pub async fn list_for_user(&self, user_id: u64) -> Result<Vec<ApiKey>, DomainError> {
        self.repository.list_by_user(user_id).await
    }

    /// Delete an API key
    pub async fn delete(&self, id: u64) -> Result<bool, DomainError> {
        info!("Deleting API key: id={}", id);
        self.repository.delete(id).await
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
