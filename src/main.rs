//! ircserv binary: load config, bind the listener, serve forever.

use ircserv::config::{Config, validate};
use ircserv::network::Gateway;
use ircserv::state::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        server = %config.server.name,
        version = %config.server.version,
        opers = config.oper.len(),
        transcripts = config.logs.transcripts,
        "Starting ircserv"
    );

    let server = Server::new(&config).map_err(|e| {
        error!(
            path = %config.logs.path.display(),
            error = %e,
            "Failed to open transcript directory"
        );
        e
    })?;
    let gateway = Gateway::bind(&config.listen, Arc::new(server)).await?;
    gateway.run().await
}
