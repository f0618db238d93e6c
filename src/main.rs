//! Service entry point.
//!
//! Startup order matters: configuration, observability, platform client,
//! then the provisioning pass runs to completion before the listener binds.
//! A provisioning failure aborts the process; the service never serves
//! traffic partially provisioned.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mintgate::config::{self, CollectionStore};
use mintgate::http::{AppState, HttpServer};
use mintgate::observability::metrics;
use mintgate::platform::poller::TransactionPoller;
use mintgate::platform::PlatformClient;
use mintgate::provisioner::Provisioner;
use mintgate::tokens::TokenOps;
use mintgate::wallet::WalletManager;

#[derive(Parser)]
#[command(name = "mintgate")]
#[command(about = "Custodial game-asset service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mintgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("mintgate v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load_config(&cli.config)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_url = %config.platform.api_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let api_url: url::Url = config.platform.api_url.parse()?;
    let client = Arc::new(PlatformClient::new(
        api_url,
        &config.platform.api_key,
        config.platform.request_timeout(),
    )?);

    let store = CollectionStore::load(&config.provisioner.state_path)?;
    let provisioner = Provisioner::new(client.clone(), store, config.provisioner.clone());
    let collection = match provisioner.ensure_ready().await {
        Ok(id) => id,
        Err(error) => {
            tracing::error!(error = %error, "Startup provisioning failed");
            return Err(error.into());
        }
    };
    tracing::info!(collection_id = %collection, "Collection and resource tokens ready");

    let poller = TransactionPoller::new(client.clone(), config.provisioner.poll_interval());
    let tokens = Arc::new(TokenOps::new(
        client.clone(),
        collection.clone(),
        &config.operations,
        poller,
    ));
    let wallets = Arc::new(WalletManager::new(client.clone(), config.wallet.clone()));

    let state = AppState {
        tokens,
        wallets,
        app_key: config.auth.app_key.clone(),
        collection,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(state, &config.listener);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
