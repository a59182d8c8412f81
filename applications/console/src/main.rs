/// Muse - catalog administration console
use clap::Parser;
use muse_console::{
    cli::Cli,
    commands::{self, Console},
    config::ConsoleConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muse_console=info,muse_admin=info,muse_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ConsoleConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let console = Console::connect(config).await?;
    commands::run(&console, cli.command).await
}
