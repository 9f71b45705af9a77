//! # Productos
//!
//! A product resource served over HTTP: list, retrieve, create, update and
//! delete at `/productos`, backed by a generic resource actor that owns the
//! store.
//!
//! ## Layers
//!
//! - **Domain types** - [`Product`](domain::Product) and its create/patch payloads
//! - **Resource framework** - the [`Entity`](actor_framework::Entity) trait, a generic
//!   `ResourceActor` that owns an injected [`Store`](store::Store), and a cloneable
//!   `ResourceClient` handle
//! - **Typed client** - [`ProductClient`](clients::ProductClient), with methods
//!   generated by `impl_basic_client!`
//! - **HTTP** - an axum route table plus request validation
//! - **System** - configuration, tracing setup, startup and graceful shutdown

mod domain;
mod clients;
mod store;

mod api;
mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::AppState;
use crate::app_system::{setup_tracing, AppConfig, ProductSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("PRODUCTOS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir).context("loading configuration")?;

    // Setup tracing once for the entire application
    setup_tracing(&config.telemetry);

    info!(config_dir = %config_dir, "Starting productos");

    let system = ProductSystem::start(&config.storage)
        .await
        .context("opening product store")?;

    let app = api::router(AppState::new(system.product_client.clone()));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(address = %address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    // The router and its client clones are gone once `serve` returns.
    system.shutdown().await.context("stopping product actor")?;

    info!("Application completed successfully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
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
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
