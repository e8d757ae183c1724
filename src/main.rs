use clap::Parser;
use api_keys::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => cli::generate::run(args).await,
    }
}
