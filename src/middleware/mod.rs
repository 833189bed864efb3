//! HTTP middleware.
//!
//! Request logging with latency tracking. Session gating lives in the auth
//! module next to the registry it checks.

pub mod logging;

pub use logging::request_logging;
