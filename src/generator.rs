//! Synthetic order generation.
//!
//! Populates a fresh store with plausible delivery records: random agent
//! names, order times spread over the current year so far, delivery 10 to
//! 60 minutes later, costs between 5.00 and 50.00. All randomness flows
//! from one seeded RNG, so a dataset can be reproduced from its seed alone.

use crate::models::{Order, OrderStatus};
use crate::store::Store;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

const FIRST_NAMES: &[&str] = &[
    "Aisha", "Alex", "Ann", "Bilal", "Bob", "Cara", "Carlos", "Dana",
    "Diego", "Elena", "Farid", "Grace", "Hana", "Ivan", "Jamal", "Jin",
    "Kavya", "Leo", "Lucia", "Marco", "Mei", "Nadia", "Omar", "Priya",
    "Ravi", "Rosa", "Sam", "Sofia", "Tariq", "Uma", "Victor", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Ahmed", "Alvarez", "Baker", "Chen", "Cohen", "Diaz", "Dubois",
    "Fischer", "Garcia", "Haddad", "Hansen", "Ivanov", "Johnson", "Kaur",
    "Kim", "Kowalski", "Lee", "Lopez", "Mehta", "Moreau", "Nakamura",
    "Nguyen", "Okafor", "Park", "Patel", "Rossi", "Santos", "Silva",
    "Singh", "Tan", "Yilmaz", "Young",
];

/// Seeding parameters for a fresh store.
#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub n_agents: usize,
    pub n_orders: usize,
    pub seed: u64,
}

/// Deterministic order generator. Two generators built from the same seed
/// produce identical output.
pub struct OrderGenerator {
    rng: ChaCha8Rng,
}

impl OrderGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw `n` distinct agent names from the name pools.
    fn agent_names(&mut self, n: usize) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(n);
        let mut attempts = 0usize;

        while names.len() < n {
            let first = FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())];
            let mut name = format!("{first} {last}");
            attempts += 1;

            if names.contains(&name) {
                // The pool is finite; disambiguate instead of spinning once
                // collisions pile up.
                if attempts > n.saturating_mul(16) {
                    name = format!("{} {}", name, names.len() + 1);
                } else {
                    continue;
                }
            }
            names.push(name);
        }

        names
    }

    /// Generate `n_orders` orders across `n_agents` distinct agents, with
    /// order times inside the current year so far. Returns an empty set when
    /// either count is zero.
    pub fn generate(&mut self, n_agents: usize, n_orders: usize) -> Vec<Order> {
        let now = Utc::now();
        let year_start = Utc
            .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        self.generate_within(n_agents, n_orders, year_start, now)
    }

    /// Same as [`generate`](Self::generate) with an explicit order-time
    /// window, so tests pin the window down.
    pub fn generate_within(
        &mut self,
        n_agents: usize,
        n_orders: usize,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<Order> {
        if n_agents == 0 || n_orders == 0 {
            return Vec::new();
        }

        let agents = self.agent_names(n_agents);
        let span_secs = (window_end - window_start).num_seconds().max(0);

        let mut orders = Vec::with_capacity(n_orders);
        for _ in 0..n_orders {
            let delivery_agent = agents[self.rng.gen_range(0..agents.len())].clone();
            let order_time = window_start + Duration::seconds(self.rng.gen_range(0..=span_secs));
            let delivery_time = order_time + Duration::minutes(self.rng.gen_range(10..=60));
            let cost = (self.rng.gen_range(5.0_f64..=50.0) * 100.0).round() / 100.0;
            let status = if self.rng.gen_bool(0.5) {
                OrderStatus::Delivered
            } else {
                OrderStatus::Cancelled
            };

            orders.push(Order {
                id: None,
                delivery_agent,
                order_time,
                delivery_time,
                cost,
                status,
            });
        }

        orders
    }
}

/// Populate the store on first run. A store file that already exists is
/// left completely untouched (no merge, no dedup) and `false` comes back;
/// `true` means a fresh store was built and seeded.
pub fn seed_store(store: &Store, cfg: SeedConfig) -> Result<bool> {
    if store.exists() {
        match store.count_orders() {
            Ok(count) => info!(
                "💾 Store already exists at {} ({} orders), skipping generation",
                store.path(),
                count
            ),
            Err(e) => warn!(
                "💾 Store already exists at {} but is unreadable ({e:#}), skipping generation",
                store.path()
            ),
        }
        return Ok(false);
    }

    info!(
        "🌱 No store found, generating {} orders across {} agents (seed {})",
        cfg.n_orders, cfg.n_agents, cfg.seed
    );

    store
        .init_schema()
        .context("Failed to create the order store")?;

    let mut generator = OrderGenerator::new(cfg.seed);
    let orders = generator.generate(cfg.n_agents, cfg.n_orders);
    let inserted = store.insert_orders(&orders)?;

    info!("✅ Seeded {} orders into {}", inserted, store.path());
    Ok(true)
}
