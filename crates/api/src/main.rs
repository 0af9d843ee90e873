mod config;
mod counters;
mod error;
mod handlers;
mod identity;
mod middleware;
mod state;
mod stores;
#[cfg(test)]
mod test_utils;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{Config, StoreBackend},
    counters::Counters,
    state::AppState,
    stores::{CounterStore, MemoryCounterStore, RedisCounterStore},
};

#[derive(Parser)]
#[command(name = "api")]
#[command(about = "checkstats detection counter API")]
struct Args {
    /// Check store connectivity and exit
    #[arg(long)]
    ping: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = envy::prefixed("CHECKSTATS_").from_env::<Config>()?;

    // Guard must stay alive for the lifetime of the process
    let _sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.env.clone().into()),
                ..Default::default()
            },
        ))
    });

    // JSON in production, human-readable otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }

    let store: Arc<dyn CounterStore> = match config.store {
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("CHECKSTATS_REDIS_URL is required when CHECKSTATS_STORE=redis")?;
            Arc::new(RedisCounterStore::new(redis::Client::open(url)?))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; counters are lost on restart");
            Arc::new(MemoryCounterStore::new())
        }
    };

    if args.ping {
        let healthy = store.health_check().await?;
        tracing::info!(healthy, "Store health check");
        anyhow::ensure!(healthy, "store did not answer PING");
        return Ok(());
    }

    let state = AppState {
        config: config.clone(),
        counters: Counters::new(store),
    };

    let app = handlers::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(store = ?config.store, "Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
