//! API Key entity and builder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generator::{TokenGenerationError, TokenGenerator};

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// API Key entity
///
/// A record starts out transient (no `id`) when it leaves [`ApiKeyBuilder::build`] and
/// becomes durable once a repository assigns its `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Storage identifier, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    /// Owning account
    #[serde(default, skip_serializing_if = "is_zero")]
    user_id: u64,
    /// Human-readable label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    alias: String,
    /// Opaque secret credential
    #[serde(default, skip_serializing_if = "String::is_empty")]
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_usage_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Finalize a builder into a transient key with a freshly generated token
    pub fn create(
        builder: ApiKeyBuilder,
        generator: &dyn TokenGenerator,
    ) -> Result<Self, TokenGenerationError> {
        let token = generator.generate()?;

        if token.is_empty() {
            return Err(TokenGenerationError::EmptyToken);
        }

        Ok(Self {
            id: None,
            user_id: builder.user_id.unwrap_or_default(),
            alias: builder.alias.unwrap_or_default(),
            token,
            last_usage_at: None,
            created_at: None,
            updated_at: None,
        })
    }

    // Getters

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn last_usage_at(&self) -> Option<DateTime<Utc>> {
        self.last_usage_at
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Whether the key has not been stored yet
    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    // Mutators used by collaborators

    /// Stamp the storage identity onto a freshly inserted key
    pub fn mark_persisted(&mut self, id: u64, at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    /// Update the alias
    pub fn set_alias(&mut self, alias: impl Into<String>, at: DateTime<Utc>) {
        self.alias = alias.into();
        self.touch(at);
    }

    /// Record a successful authentication with this key
    pub fn record_usage(&mut self, at: DateTime<Utc>) {
        self.last_usage_at = Some(at);
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Configuration for a new API key
///
/// Unset fields fall back to their zero value when the key is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyBuilder {
    pub user_id: Option<u64>,
    pub alias: Option<String>,
}

impl ApiKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the owning account
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Set the alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mint a token and return the transient key
    pub fn build(self, generator: &dyn TokenGenerator) -> Result<ApiKey, TokenGenerationError> {
        ApiKey::create(self, generator)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::domain::api_key::generator::MockTokenGenerator;
    use crate::infrastructure::api_key::UuidTokenGenerator;

    /// Deterministic generator handing out "tok-1", "tok-2", ...
    #[derive(Debug, Default)]
    struct SequenceGenerator {
        next: AtomicU64,
    }

    impl TokenGenerator for SequenceGenerator {
        fn generate(&self) -> Result<String, TokenGenerationError> {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("tok-{}", n))
        }
    }

    #[test]
    fn test_build_sets_owner_and_alias() {
        let generator = SequenceGenerator::default();
        let owners = [0, 1, 42, u64::MAX];
        let aliases = ["", "ci", "reader app", "ünïcødé"];

        for owner in owners {
            for alias in aliases {
                let key = ApiKeyBuilder::new()
                    .user_id(owner)
                    .alias(alias)
                    .build(&generator)
                    .unwrap();

                assert_eq!(key.user_id(), owner);
                assert_eq!(key.alias(), alias);
                assert_eq!(key.id(), None);
                assert!(key.is_transient());
                assert!(!key.token().is_empty());
            }
        }
    }

    #[test]
    fn test_build_leaves_timestamps_unset() {
        let key = ApiKeyBuilder::new()
            .user_id(3)
            .build(&SequenceGenerator::default())
            .unwrap();

        assert!(key.created_at().is_none());
        assert!(key.updated_at().is_none());
        assert!(key.last_usage_at().is_none());
    }

    #[test]
    fn test_build_without_fields() {
        let key = ApiKeyBuilder::new()
            .build(&SequenceGenerator::default())
            .unwrap();

        assert_eq!(key.user_id(), 0);
        assert_eq!(key.alias(), "");
        assert_eq!(key.token(), "tok-1");
    }

    #[test]
    fn test_create_matches_builder() {
        let config = ApiKeyBuilder {
            user_id: Some(9),
            alias: None,
        };
        let key = ApiKey::create(config, &SequenceGenerator::default()).unwrap();

        assert_eq!(key.user_id(), 9);
        assert_eq!(key.alias(), "");
    }

    #[test]
    fn test_tokens_are_distinct() {
        let generator = UuidTokenGenerator::new();
        let tokens: HashSet<String> = (0..1000)
            .map(|_| {
                ApiKeyBuilder::new()
                    .build(&generator)
                    .unwrap()
                    .token()
                    .to_string()
            })
            .collect();

        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_build_surfaces_generator_failure() {
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|| Err(TokenGenerationError::failed("entropy source unavailable")));

        let result = ApiKeyBuilder::new().user_id(1).build(&generator);

        assert_eq!(
            result,
            Err(TokenGenerationError::failed("entropy source unavailable"))
        );
    }

    #[test]
    fn test_build_rejects_empty_token() {
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .returning(|| Ok(String::new()));

        let result = ApiKeyBuilder::new().user_id(1).alias("ci").build(&generator);

        assert_eq!(result, Err(TokenGenerationError::EmptyToken));
    }

    #[test]
    fn test_serialize_omits_unset_fields() {
        let key = ApiKeyBuilder::new()
            .user_id(5)
            .build(&SequenceGenerator::default())
            .unwrap();

        let json = serde_json::to_value(&key).unwrap();

        assert_eq!(json, serde_json::json!({ "user_id": 5, "token": "tok-1" }));

        let decoded: ApiKey = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_serialize_persisted_key() {
        let mut key = ApiKeyBuilder::new()
            .user_id(5)
            .alias("feeds")
            .build(&SequenceGenerator::default())
            .unwrap();
        let at = "2024-03-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        key.mark_persisted(12, at);
        key.record_usage(at);

        let json = serde_json::to_value(&key).unwrap();

        assert_eq!(json["id"], 12);
        assert_eq!(json["alias"], "feeds");
        assert_eq!(json["created_at"], "2024-03-01T10:00:00Z");
        assert_eq!(json["updated_at"], "2024-03-01T10:00:00Z");
        assert_eq!(json["last_usage_at"], "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let key: ApiKey = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();

        assert_eq!(key.id(), None);
        assert_eq!(key.user_id(), 0);
        assert_eq!(key.alias(), "");
        assert_eq!(key.token(), "abc");
    }

    #[test]
    fn test_set_alias_touches_updated_at() {
        let mut key = ApiKeyBuilder::new()
            .build(&SequenceGenerator::default())
            .unwrap();
        let at = Utc::now();

        key.set_alias("renamed", at);

        assert_eq!(key.alias(), "renamed");
        assert_eq!(key.updated_at(), Some(at));
        assert_eq!(key.token(), "tok-1");
    }
}
