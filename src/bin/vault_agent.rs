//! vault-agent HTTP server binary.
//!
//! Serves unsigned function calls for the full vault contract surface and its
//! plugin manifest.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `BITTE_CONFIG` — JSON with the public `url` advertised by the manifest
//! - `RUST_LOG` — Tracing filter (default: "info,vault_agent=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin vault-agent
//! ```

use vault_agent::config::AgentConfig;
use vault_agent::contract::Service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vault_agent=debug".into()),
        )
        .init();

    let config = AgentConfig::from_env()?;

    vault_agent::server::serve(Service::Vault, config).await
}
