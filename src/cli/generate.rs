//! Generate command - mints a new API key and prints it

use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::api_key::{ApiKey, ApiKeyBuilder, TokenGenerator};
use crate::domain::DomainError;
use crate::infrastructure::api_key::{ApiKeyService, InMemoryApiKeyRepository};
use crate::infrastructure::logging;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Owning account ID
    #[arg(long)]
    pub user_id: u64,

    /// Optional human-readable label
    #[arg(long)]
    pub alias: Option<String>,

    /// Run the key through a throwaway in-memory repository so the output shows
    /// an assigned `id` and timestamps. Nothing is kept after the process exits.
    #[arg(long)]
    pub persist: bool,
}

/// Run the generate command
pub async fn run(args: GenerateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging)?;

    let api_key = generate(&args, config.token.generator()).await?;
    info!("Generated API key for user_id={}", api_key.user_id());

    println!("{}", serde_json::to_string_pretty(&api_key)?);

    Ok(())
}

async fn generate(
    args: &GenerateArgs,
    generator: Box<dyn TokenGenerator>,
) -> Result<ApiKey, DomainError> {
    if args.persist {
        let service = ApiKeyService::new(Arc::new(InMemoryApiKeyRepository::new()))
            .with_generator(generator);

        return service
            .create(args.user_id, args.alias.clone().unwrap_or_default())
            .await;
    }

    let mut builder = ApiKeyBuilder::new().user_id(args.user_id);

    if let Some(alias) = &args.alias {
        builder = builder.alias(alias.clone());
    }

    Ok(builder.build(generator.as_ref())?)
}
