use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quotagate::config::ClientConfig;
use quotagate::submit::{Document, RegistrationClient};

/// Rate-limited document registration demo.
#[derive(Parser, Debug)]
#[command(name = "quotagate", version, about)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting quotagate submission demo");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = match args.config {
        Some(path) => ClientConfig::from_file(&path)?,
        None => ClientConfig::default(),
    };
    info!(
        endpoint = %config.endpoint,
        capacity = config.capacity,
        window = ?config.window,
        "Configuration loaded"
    );

    let client = RegistrationClient::new(config)?;
    let document = Document::sample();

    let handle = client.submit(&document, "Signature").await?;
    match handle.completion().await {
        Ok(status) => info!(code = status.code, "Response received"),
        Err(e) => error!(error = %e, "Submission failed"),
    }

    client.shutdown();
    Ok(())
}
