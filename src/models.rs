use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery outcome. The dataset is closed over these two states, so any
/// filtered view satisfies delivered + cancelled == total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// One delivery transaction record. Created in bulk by the generator and
/// immutable afterwards; `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<i64>,
    pub delivery_agent: String,
    pub order_time: DateTime<Utc>,
    pub delivery_time: DateTime<Utc>,
    pub cost: f64,
    pub status: OrderStatus,
}

impl Order {
    /// Seconds between ordering and delivery.
    pub fn delivery_duration_secs(&self) -> i64 {
        (self.delivery_time - self.order_time).num_seconds()
    }
}

/// Status selector for a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            other => OrderStatus::from_str(other).map(StatusFilter::Only),
        }
    }

    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(only) => *only == status,
        }
    }
}

/// User-chosen predicate narrowing the order set for one request.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Case-insensitive substring of the delivery agent name. An empty
    /// string means no agent filter at all.
    pub agent: Option<String>,
    pub status: StatusFilter,
}

impl OrderFilter {
    pub fn new(agent: Option<String>, status: StatusFilter) -> Self {
        let agent = agent.filter(|a| !a.is_empty());
        Self { agent, status }
    }
}

/// Aggregate statistics over a filtered order set. The mean fields are
/// `None` for an empty set and rendered as N/A downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
    pub avg_cost: Option<f64>,
    pub avg_delivery_minutes: Option<i64>,
}

/// Order count for one delivery agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOrderCount {
    pub agent: String,
    pub count: usize,
}

/// Order count for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Chart-ready projections of a filtered order set. The rendering frontend
/// consumes these as-is and computes nothing itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub orders_by_agent: Vec<AgentOrderCount>,
    pub status_distribution: Vec<StatusCount>,
    pub cost_values: Vec<f64>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub seed_agents: usize,
    pub seed_orders: usize,
    /// Seed for the synthetic-data generator; a random one is drawn (and
    /// logged) when unset so any first run can be reproduced.
    pub generator_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./food_delivery.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let seed_agents = std::env::var("SEED_AGENTS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        let seed_orders = std::env::var("SEED_ORDERS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let generator_seed = std::env::var("GENERATOR_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        Ok(Self {
            database_path,
            port,
            seed_agents,
            seed_orders,
            generator_seed,
        })
    }
}
