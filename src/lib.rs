//! Spinx Delivery Dashboard Backend
//!
//! Reads delivery orders from a single-file SQLite store, aggregates them
//! into metrics and chart series, and serves the results over a
//! session-gated JSON API. A seeded generator populates the store on the
//! first run; every later run reuses the file as-is.

pub mod aggregate;
pub mod api;
pub mod auth;
pub mod generator;
pub mod middleware;
pub mod models;
pub mod store;

use crate::{auth::sessions::SessionManager, store::Store};
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(SessionManager::new()),
        }
    }
}
