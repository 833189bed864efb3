//! Access Gate Module
//! Mission: Keep the dashboard behind a username/password login

pub mod api;
pub mod middleware;
pub mod models;
pub mod sessions;

pub use middleware::session_middleware;
pub use models::{Credential, Session, SessionState};
pub use sessions::SessionManager;
