//! Spinx Delivery - Dashboard Backend
//! Mission: Serve order metrics and charts from a local store behind a login
//!
//! The browser frontend renders; this binary stores, filters, and computes.

use anyhow::{Context, Result};
use dotenv::dotenv;
use spinx_dashboard::{
    api,
    generator::{seed_store, SeedConfig},
    models::Config,
    store::Store,
    AppState,
};
use std::path::Path;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    info!("🛵 Spinx Delivery Dashboard Starting");

    let config = Config::from_env()?;
    let store = Store::new(&config.database_path);

    // First run builds the store before anything reads it; later runs reuse
    // the existing file untouched.
    let seed = config.generator_seed.unwrap_or_else(rand::random);
    seed_store(
        &store,
        SeedConfig {
            n_agents: config.seed_agents,
            n_orders: config.seed_orders,
            seed,
        },
    )
    .context("Failed to initialize the order store")?;

    info!("📊 Order store ready at: {}", store.path());

    let state = AppState::new(store);
    let app = api::router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🎯 Dashboard API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spinx_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate directory .env (common when running with
    // --manifest-path from elsewhere)
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
