use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use frit_api::{
    config::{Environment, FritApiConfig},
    server,
};
use frit_db::storage::{Storage, memory::MemoryStorage};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "frit_api=info,frit_db=info,tower_http=info";

/// How long open connections get to finish once a shutdown signal arrives.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FritApiConfig::parse();

    let storage: Arc<dyn Storage> = if config.no_seed {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(MemoryStorage::seeded())
    };

    let (router, api) = server::make(config.clone(), storage);

    if config.dump_openapi {
        print!("{}", api.to_pretty_json()?);
        return Ok(());
    }

    init_tracing(config.environment);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(environment = %config.environment, "Listening on http://{:?}", config.bind_addr);

    server::serve(listener, router, shutdown_signal(), SHUTDOWN_GRACE).await?;

    info!("Shutdown complete");

    Ok(())
}

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or(DEFAULT_LOG_FILTER.into());

    match environment {
        Environment::Development => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init(),
        Environment::Production => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
