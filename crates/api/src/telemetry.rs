//! Prometheus Metrics

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info};

use crate::config::MetricsConfig;

/// Install the global Prometheus recorder
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusHandle> {
    if !config.enabled {
        info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("visa_estimator_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            info!("Prometheus metrics initialized at /metrics");
            Some(handle)
        }
        Err(e) => {
            error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Router serving `/metrics`
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(handle)
}

async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}

/// Record a successful prediction; `channel` is `api` or `form`
pub fn record_prediction(channel: &'static str, days: i64) {
    counter!("visa_predictions_total", "channel" => channel).increment(1);
    histogram!("visa_predicted_days").record(days as f64);
}

pub fn record_prediction_failure(channel: &'static str) {
    counter!("visa_prediction_failures_total", "channel" => channel).increment(1);
}

pub fn record_history_save() {
    counter!("visa_history_saves_total").increment(1);
}
