//! DavCoin Ledger - balance backend
//!
//! Tracks DavCoin balances per user and pays out NGN withdrawals through
//! a payment provider.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use davcoin_ledger::api::{self, AppState, FixedWindowLimiter};
use davcoin_ledger::provider::HttpTransferProvider;
use davcoin_ledger::store::JsonFileStore;
use davcoin_ledger::{Config, ExchangeRates, Ledger};

/// Initialize tracing/logging
///
/// `LOG_FORMAT=json` switches to structured JSON lines.
fn init_tracing() {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "davcoin_ledger=debug,tower_http=debug".into()),
    );

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    api::create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Starting DavCoin ledger");
    tracing::info!(path = %config.data_file.display(), "Loading ledger state");

    let rates = ExchangeRates::new(config.usd_to_ngn, config.dav_coin_value_usd);
    let store = JsonFileStore::new(&config.data_file);
    let ledger = Arc::new(Ledger::open(rates, Arc::new(store)).await);

    let provider = HttpTransferProvider::new(&config.provider)?;
    tracing::info!(provider = ?config.provider, "Payment provider configured");

    let limiter = FixedWindowLimiter::new(config.withdraw_rate_limit, config.withdraw_rate_window);
    let state = AppState::new(ledger, Arc::new(provider), limiter);

    let app = build_router(state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Client addresses key the withdrawal rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
