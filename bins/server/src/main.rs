//! Invoicer API Server
//!
//! Main entry point for the wallet ledger service.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use invoicer_api::{AppState, create_router};
use invoicer_core::ledger::CurrencyPolicy;
use invoicer_db::{PgAccountRepository, connect_with_config, migration::Migrator};
use invoicer_shared::{AppConfig, Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(config.app.env);
    info!(env = %config.app.env, "Starting invoicer");
    debug!("Debug messages enabled");

    let db = connect_with_config(&config.database)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    if config.database.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to run migrations")?;
        info!("Migrations applied");
    }

    let policy = CurrencyPolicy::from_config(config.ledger.supported_currencies.as_deref())
        .context("invalid ledger.supported_currencies")?;
    if let CurrencyPolicy::AllowList(codes) = &policy {
        info!(count = codes.len(), "Currency allow-list enabled");
    }

    let state = AppState::new(Arc::new(PgAccountRepository::new(db)), policy);
    let app = create_router(state, Duration::from_secs(config.server.timeout_secs));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Default log filter when `RUST_LOG` is unset.
fn default_filter(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "invoicer=debug,tower_http=debug",
        Environment::Prod => "invoicer=info,tower_http=info",
    }
}

/// Local runs get human-readable output; dev and prod emit JSON lines.
fn init_tracing(env: Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(env).into());
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        Environment::Local => registry.with(fmt::layer().pretty()).init(),
        Environment::Dev | Environment::Prod => registry.with(fmt::layer().json()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
