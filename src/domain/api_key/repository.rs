//! API Key repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::entity::ApiKey;
use crate::domain::DomainError;

/// Repository trait for API key storage
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Insert a transient key, assigning its `id`, `created_at` and `updated_at`
    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError>;

    /// Get an API key by its storage ID
    async fn get(&self, id: u64) -> Result<Option<ApiKey>, DomainError>;

    /// Get an API key by its token (for lookup during authentication)
    async fn get_by_token(&self, token: &str) -> Result<Option<ApiKey>, DomainError>;

    /// List the keys owned by a user, ordered by ID
    async fn list_by_user(&self, user_id: u64) -> Result<Vec<ApiKey>, DomainError>;

    /// Update an existing API key
    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError>;

    /// Record usage of an API key
    async fn record_usage(&self, id: u64, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Delete an API key
    async fn delete(&self, id: u64) -> Result<bool, DomainError>;

    /// Check if an API key ID exists
    async fn exists(&self, id: u64) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
