//! Order Store Seeder
//!
//! CLI tool to build (or with --force rebuild) a Spinx Delivery order store
//! without starting the dashboard server. Handy for preparing demo files
//! and for reproducing a dataset from its seed.
//!
//! Usage:
//!   cargo run --bin seed-orders -- --db-path ./food_delivery.db
//!   cargo run --bin seed-orders -- --db-path ./demo.db --agents 5 --orders 200 --seed 42 --force

use anyhow::{Context, Result};
use clap::Parser;
use spinx_dashboard::generator::{seed_store, SeedConfig};
use spinx_dashboard::store::Store;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Build a synthetic order store for the Spinx Delivery dashboard
#[derive(Parser, Debug)]
#[command(name = "seed-orders")]
#[command(about = "Generate a synthetic delivery-order store")]
struct Cli {
    /// Path to the SQLite store file
    #[arg(long, default_value = "./food_delivery.db")]
    db_path: PathBuf,

    /// Number of distinct delivery agents
    #[arg(long, default_value_t = 10)]
    agents: usize,

    /// Number of orders to generate
    #[arg(long, default_value_t = 1000)]
    orders: usize,

    /// Generator seed; the same seed reproduces the same dataset
    #[arg(long)]
    seed: Option<u64>,

    /// Delete an existing store file before generating
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seed_orders=info".parse().unwrap())
                .add_directive("spinx_dashboard=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if cli.force && cli.db_path.exists() {
        fs::remove_file(&cli.db_path)
            .with_context(|| format!("Failed to remove {}", cli.db_path.display()))?;
        info!("🗑️  Removed existing store at {}", cli.db_path.display());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let store = Store::new(cli.db_path.to_string_lossy());

    let seeded = seed_store(
        &store,
        SeedConfig {
            n_agents: cli.agents,
            n_orders: cli.orders,
            seed,
        },
    )?;

    if !seeded {
        info!("Store already present, rerun with --force to rebuild");
    }

    Ok(())
}
