//! `spinhook`: receive Slack-compatible webhooks and relay them to the
//! configured chat platform.

use clap::Parser;
use spinhook_core::RelayConfig;
use spinhook_gateway::RelayServer;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "spinhook",
    version,
    about = "Slack Compatible API Webhook Receiver to Send Discord, Telegram, Webex or Slack Notifications"
)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8090)]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the YAML config file
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let config = RelayConfig::load(&cli.config)
        .map_err(|e| anyhow::anyhow!("ERROR: {e}"))?;
    let app = RelayServer::build(&config)?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "spinhook listening");
    axum::serve(listener, app).await?;

    Ok(())
}
