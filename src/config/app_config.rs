use serde::Deserialize;

use crate::domain::api_key::TokenGenerator;
use crate::infrastructure::api_key::{RandomTokenGenerator, UuidTokenGenerator};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which token generator new API keys are minted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenGeneratorKind {
    #[default]
    Uuid,
    Random,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub kind: TokenGeneratorKind,
    /// Only used by the random generator
    pub prefix: String,
    /// Only used by the random generator
    pub token_bytes: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            kind: TokenGeneratorKind::default(),
            prefix: String::new(),
            token_bytes: RandomTokenGenerator::DEFAULT_TOKEN_BYTES,
        }
    }
}

impl TokenConfig {
    /// Instantiate the configured generator
    pub fn generator(&self) -> Box<dyn TokenGenerator> {
        match self.kind {
            TokenGeneratorKind::Uuid => Box::new(UuidTokenGenerator::new()),
            TokenGeneratorKind::Random => Box::new(
                RandomTokenGenerator::new(&self.prefix).with_token_bytes(self.token_bytes),
            ),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
