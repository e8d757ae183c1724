//! In-memory API key repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    keys: BTreeMap<u64, ApiKey>,
    token_index: HashMap<String, u64>,
    last_id: u64,
}

/// In-memory implementation of ApiKeyRepository
///
/// IDs are assigned sequentially starting at 1 and never reused.
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn create(&self, mut api_key: ApiKey) -> Result<ApiKey, DomainError> {
        if let Some(id) = api_key.id() {
            return Err(DomainError::validation(format!(
                "API key already persisted with ID '{}'",
                id
            )));
        }

        if api_key.token().is_empty() {
            return Err(DomainError::validation("API key token cannot be empty"));
        }

        let mut tables = self.tables.write().await;

        if tables.token_index.contains_key(api_key.token()) {
            return Err(DomainError::conflict(
                "API key with the same token already exists",
            ));
        }

        tables.last_id += 1;
        let id = tables.last_id;
        api_key.mark_persisted(id, Utc::now());

        tables.token_index.insert(api_key.token().to_string(), id);
        tables.keys.insert(id, api_key.clone());

        Ok(api_key)
    }

    async fn get(&self, id: u64) -> Result<Option<ApiKey>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.keys.get(&id).cloned())
    }

    async fn get_by_token(&self, token: &str) -> Result<Option<ApiKey>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .token_index
            .get(token)
            .and_then(|id| tables.keys.get(id))
            .cloned())
    }

    async fn list_by_user(&self, user_id: u64) -> Result<Vec<ApiKey>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .keys
            .values()
            .filter(|k| k.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError> {
        let id = api_key
            .id()
            .ok_or_else(|| DomainError::not_found("API key has not been persisted"))?;

        let mut tables = self.tables.write().await;
        let stored = tables
            .keys
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))?;

        if stored.token() != api_key.token() {
            return Err(DomainError::validation("API key token is immutable"));
        }

        // Only the alias is caller-editable; identity, creation and usage stay as stored.
        stored.set_alias(api_key.alias(), Utc::now());

        Ok(stored.clone())
    }

    async fn record_usage(&self, id: u64, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if let Some(key) = tables.keys.get_mut(&id) {
            key.record_usage(at);
            Ok(())
        } else {
            Err(DomainError::not_found(format!("API key '{}' not found", id)))
        }
    }

    async fn delete(&self, id: u64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;

        if let Some(key) = tables.keys.remove(&id) {
            tables.token_index.remove(key.token());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
