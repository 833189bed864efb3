//! Filtering and aggregation over an in-memory order set.
//!
//! Everything here is pure: the store is read elsewhere and the results go
//! straight to the rendering frontend. The two filter predicates are
//! independent, so agent and status criteria can be applied in either order
//! with the same outcome.

use crate::models::{
    AgentOrderCount, ChartSeries, MetricsSnapshot, Order, OrderFilter, OrderStatus, StatusCount,
};
use std::collections::HashMap;

/// A filtered view with its derived metrics and chart series.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub orders: Vec<Order>,
    pub metrics: MetricsSnapshot,
    pub charts: ChartSeries,
}

/// One-shot aggregation for a dashboard request.
pub fn aggregate(orders: Vec<Order>, filter: &OrderFilter) -> DashboardView {
    let orders = apply_filter(orders, filter);
    let metrics = compute_metrics(&orders);
    let charts = chart_series(&orders);
    DashboardView {
        orders,
        metrics,
        charts,
    }
}

/// Narrow `orders` to the records matching `filter`. Agent matching is a
/// case-insensitive substring test.
pub fn apply_filter(mut orders: Vec<Order>, filter: &OrderFilter) -> Vec<Order> {
    let needle = filter.agent.as_ref().map(|a| a.to_lowercase());

    orders.retain(|order| {
        let agent_ok = needle
            .as_deref()
            .map(|n| order.delivery_agent.to_lowercase().contains(n))
            .unwrap_or(true);
        agent_ok && filter.status.matches(order.status)
    });

    orders
}

/// Compute the metrics snapshot for a filtered set. Mean fields come back
/// `None` when the set is empty; an empty result is not an error.
pub fn compute_metrics(orders: &[Order]) -> MetricsSnapshot {
    let total_orders = orders.len();
    let delivered_orders = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .count();
    let cancelled_orders = total_orders - delivered_orders;

    let (avg_cost, avg_delivery_minutes) = if orders.is_empty() {
        (None, None)
    } else {
        let avg_cost = orders.iter().map(|o| o.cost).sum::<f64>() / total_orders as f64;

        let total_secs: i64 = orders.iter().map(|o| o.delivery_duration_secs()).sum();
        let mean_secs = total_secs as f64 / total_orders as f64;
        // Whole minutes, truncated. 29m59s reads as 29.
        let avg_delivery_minutes = (mean_secs / 60.0).floor() as i64;

        (Some(avg_cost), Some(avg_delivery_minutes))
    };

    MetricsSnapshot {
        total_orders,
        delivered_orders,
        cancelled_orders,
        avg_cost,
        avg_delivery_minutes,
    }
}

/// Project a filtered set into chart-ready series.
pub fn chart_series(orders: &[Order]) -> ChartSeries {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for order in orders {
        *counts.entry(order.delivery_agent.as_str()).or_insert(0) += 1;
    }

    let mut orders_by_agent: Vec<AgentOrderCount> = counts
        .into_iter()
        .map(|(agent, count)| AgentOrderCount {
            agent: agent.to_string(),
            count,
        })
        .collect();
    // Busiest agents first, names break ties, so the chart is stable
    // across requests.
    orders_by_agent.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.agent.cmp(&b.agent)));

    let mut status_distribution = Vec::with_capacity(2);
    for status in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        let count = orders.iter().filter(|o| o.status == status).count();
        if count > 0 {
            status_distribution.push(StatusCount { status, count });
        }
    }

    let cost_values = orders.iter().map(|o| o.cost).collect();

    ChartSeries {
        orders_by_agent,
        status_distribution,
        cost_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusFilter;
    use chrono::{Duration, TimeZone, Utc};

    fn order(agent: &str, minutes: i64, cost: f64, status: OrderStatus) -> Order {
        let order_time = Utc.with_ymd_and_hms(2026, 4, 10, 12, 0, 0).unwrap();
        Order {
            id: None,
            delivery_agent: agent.to_string(),
            order_time,
            delivery_time: order_time + Duration::minutes(minutes),
            cost,
            status,
        }
    }

    fn ann_bob_dataset() -> Vec<Order> {
        vec![
            order("Ann", 20, 10.00, OrderStatus::Delivered),
            order("Ann", 40, 20.00, OrderStatus::Cancelled),
            order("Bob", 30, 30.00, OrderStatus::Delivered),
        ]
    }

    #[test]
    fn test_ann_filter_scenario() {
        let filter = OrderFilter::new(Some("an".to_string()), StatusFilter::All);
        let view = aggregate(ann_bob_dataset(), &filter);

        assert_eq!(view.orders.len(), 2);
        assert_eq!(view.metrics.total_orders, 2);
        assert_eq!(view.metrics.delivered_orders, 1);
        assert_eq!(view.metrics.cancelled_orders, 1);
        assert_eq!(view.metrics.avg_cost, Some(15.00));
        assert_eq!(view.metrics.avg_delivery_minutes, Some(30));
    }

    #[test]
    fn test_unfiltered_metrics() {
        let metrics = compute_metrics(&ann_bob_dataset());

        assert_eq!(metrics.total_orders, 3);
        assert_eq!(metrics.delivered_orders, 2);
        assert_eq!(metrics.cancelled_orders, 1);
        assert_eq!(metrics.avg_cost, Some(20.00));
        assert_eq!(metrics.avg_delivery_minutes, Some(30));
    }

    #[test]
    fn test_delivered_plus_cancelled_equals_total() {
        for status in [
            StatusFilter::All,
            StatusFilter::Only(OrderStatus::Delivered),
            StatusFilter::Only(OrderStatus::Cancelled),
        ] {
            let filter = OrderFilter::new(None, status);
            let metrics = compute_metrics(&apply_filter(ann_bob_dataset(), &filter));
            assert_eq!(
                metrics.delivered_orders + metrics.cancelled_orders,
                metrics.total_orders
            );
        }
    }

    #[test]
    fn test_filter_criteria_commute() {
        let agent_only = OrderFilter::new(Some("ann".to_string()), StatusFilter::All);
        let status_only =
            OrderFilter::new(None, StatusFilter::Only(OrderStatus::Delivered));
        let combined = OrderFilter::new(
            Some("ann".to_string()),
            StatusFilter::Only(OrderStatus::Delivered),
        );

        let agent_then_status =
            apply_filter(apply_filter(ann_bob_dataset(), &agent_only), &status_only);
        let status_then_agent =
            apply_filter(apply_filter(ann_bob_dataset(), &status_only), &agent_only);
        let one_shot = apply_filter(ann_bob_dataset(), &combined);

        assert_eq!(agent_then_status, status_then_agent);
        assert_eq!(agent_then_status, one_shot);
        assert_eq!(one_shot.len(), 1);
        assert_eq!(one_shot[0].delivery_agent, "Ann");
    }

    #[test]
    fn test_agent_match_is_case_insensitive_substring() {
        let filter = OrderFilter::new(Some("aN".to_string()), StatusFilter::All);
        let filtered = apply_filter(ann_bob_dataset(), &filter);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|o| o.delivery_agent == "Ann"));
    }

    #[test]
    fn test_empty_set_yields_null_metrics() {
        let filter = OrderFilter::new(Some("zoe".to_string()), StatusFilter::All);
        let view = aggregate(ann_bob_dataset(), &filter);

        assert!(view.orders.is_empty());
        assert_eq!(view.metrics.total_orders, 0);
        assert_eq!(view.metrics.delivered_orders, 0);
        assert_eq!(view.metrics.cancelled_orders, 0);
        assert_eq!(view.metrics.avg_cost, None);
        assert_eq!(view.metrics.avg_delivery_minutes, None);

        assert!(view.charts.orders_by_agent.is_empty());
        assert!(view.charts.status_distribution.is_empty());
        assert!(view.charts.cost_values.is_empty());
    }

    #[test]
    fn test_mean_minutes_truncate_toward_zero() {
        let orders = vec![
            order("Ann", 10, 5.00, OrderStatus::Delivered),
            order("Ann", 11, 5.00, OrderStatus::Delivered),
        ];
        // Mean is 10.5 minutes, reported as 10.
        let metrics = compute_metrics(&orders);
        assert_eq!(metrics.avg_delivery_minutes, Some(10));
    }

    #[test]
    fn test_orders_by_agent_sorted_by_count_then_name() {
        let orders = vec![
            order("Bob", 20, 5.00, OrderStatus::Delivered),
            order("Cara", 20, 5.00, OrderStatus::Delivered),
            order("Ann", 20, 5.00, OrderStatus::Delivered),
            order("Cara", 20, 5.00, OrderStatus::Delivered),
        ];
        let charts = chart_series(&orders);

        let ranked: Vec<(&str, usize)> = charts
            .orders_by_agent
            .iter()
            .map(|c| (c.agent.as_str(), c.count))
            .collect();
        assert_eq!(ranked, vec![("Cara", 2), ("Ann", 1), ("Bob", 1)]);
    }

    #[test]
    fn test_status_distribution_skips_absent_statuses() {
        let orders = vec![
            order("Ann", 20, 5.00, OrderStatus::Delivered),
            order("Bob", 20, 5.00, OrderStatus::Delivered),
        ];
        let charts = chart_series(&orders);

        assert_eq!(charts.status_distribution.len(), 1);
        assert_eq!(charts.status_distribution[0].status, OrderStatus::Delivered);
        assert_eq!(charts.status_distribution[0].count, 2);
    }

    #[test]
    fn test_cost_values_follow_filtered_set() {
        let filter = OrderFilter::new(
            None,
            StatusFilter::Only(OrderStatus::Delivered),
        );
        let view = aggregate(ann_bob_dataset(), &filter);

        assert_eq!(view.charts.cost_values, vec![10.00, 30.00]);
    }
}
