//! Dashboard Data Endpoints
//!
//! Thin handlers over one fetch-filter-compute cycle: open the store, read
//! the full order set, aggregate in memory, hand back JSON. The rendering
//! frontend consumes these responses verbatim and computes nothing itself.

use crate::{
    aggregate::{aggregate, DashboardView},
    models::{AgentOrderCount, MetricsSnapshot, Order, OrderFilter, StatusCount, StatusFilter},
    AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Filter parameters shared by every dashboard endpoint.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Case-insensitive substring of the delivery agent name.
    pub agent: Option<String>,
    /// One of all | delivered | cancelled. Missing or empty means all.
    pub status: Option<String>,
}

impl DashboardQuery {
    fn into_filter(self) -> Result<OrderFilter, ApiError> {
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            None => StatusFilter::All,
            Some(raw) => StatusFilter::from_str(raw).ok_or(ApiError::InvalidStatusFilter)?,
        };

        Ok(OrderFilter::new(self.agent, status))
    }
}

/// Filtered order table - GET /api/orders
pub async fn get_orders(
    Query(params): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<OrdersResponse>, ApiError> {
    let view = load_view(&state, params)?;

    Ok(Json(OrdersResponse {
        count: view.orders.len(),
        orders: view.orders,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// Metrics snapshot - GET /api/metrics
pub async fn get_metrics(
    Query(params): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, ApiError> {
    let view = load_view(&state, params)?;

    Ok(Json(MetricsResponse {
        metrics: view.metrics,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// Chart series - GET /api/charts
pub async fn get_charts(
    Query(params): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<ChartsResponse>, ApiError> {
    let view = load_view(&state, params)?;

    Ok(Json(ChartsResponse {
        orders_by_agent: view.charts.orders_by_agent,
        status_distribution: view.charts.status_distribution,
        cost_values: view.charts.cost_values,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// One read-and-compute cycle shared by all three endpoints.
fn load_view(state: &AppState, query: DashboardQuery) -> Result<DashboardView, ApiError> {
    let filter = query.into_filter()?;

    let orders = state.store.fetch_orders().map_err(|e| {
        warn!("Order store unreachable: {e:#}");
        ApiError::StorageUnavailable
    })?;

    Ok(aggregate(orders, &filter))
}

/// Order table response
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    pub count: usize,
    pub timestamp: String,
}

/// Metrics response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub timestamp: String,
}

/// Chart data response
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub orders_by_agent: Vec<AgentOrderCount>,
    pub status_distribution: Vec<StatusCount>,
    pub cost_values: Vec<f64>,
    pub timestamp: String,
}

/// Dashboard API errors
#[derive(Debug)]
pub enum ApiError {
    StorageUnavailable,
    InvalidStatusFilter,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::StorageUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Order store unavailable")
            }
            ApiError::InvalidStatusFilter => (
                StatusCode::BAD_REQUEST,
                "Invalid status filter. Use: all, delivered, cancelled",
            ),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    fn query(agent: Option<&str>, status: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            agent: agent.map(|s| s.to_string()),
            status: status.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_query_defaults_to_all() {
        let filter = query(None, None).into_filter().unwrap();
        assert!(filter.agent.is_none());
        assert_eq!(filter.status, StatusFilter::All);
    }

    #[test]
    fn test_query_parses_status_case_insensitively() {
        let filter = query(None, Some("Delivered")).into_filter().unwrap();
        assert_eq!(filter.status, StatusFilter::Only(OrderStatus::Delivered));

        let filter = query(None, Some("ALL")).into_filter().unwrap();
        assert_eq!(filter.status, StatusFilter::All);
    }

    #[test]
    fn test_query_treats_empty_strings_as_absent() {
        let filter = query(Some(""), Some("")).into_filter().unwrap();
        assert!(filter.agent.is_none());
        assert_eq!(filter.status, StatusFilter::All);
    }

    #[test]
    fn test_query_rejects_unknown_status() {
        let err = query(None, Some("refunded")).into_filter().unwrap_err();
        assert!(matches!(err, ApiError::InvalidStatusFilter));
    }

    #[test]
    fn test_api_error_responses() {
        let unavailable = ApiError::StorageUnavailable.into_response();
        assert_eq!(unavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad_status = ApiError::InvalidStatusFilter.into_response();
        assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);
    }
}
