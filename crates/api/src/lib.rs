//! Visa Processing Time Estimator API Server
//!
//! JSON prediction endpoint and web form for the visa processing time model.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod config;
pub mod error;
mod html;
pub mod logging;
mod routes;
pub mod telemetry;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::predict::PredictResponse;

use data_validator::Validator;
use feature_engine::ApplicantInput;
use inference_engine::{load_model, InferenceEngine, Prediction};
use storage::HistoryStore;

/// Application state shared across handlers
pub struct AppState {
    /// Loaded model, read-only for the life of the process
    pub engine: InferenceEngine,
    /// Saved predictions
    pub history: Mutex<HistoryStore>,
    /// Form input bounds
    pub validator: Validator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine, history: HistoryStore) -> Self {
        Self {
            engine,
            history: Mutex::new(history),
            validator: Validator::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Load the model and history named in the configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let model = load_model(&config.model)?;
        let history = HistoryStore::load(&config.history.path)?;
        Ok(Self::new(InferenceEngine::new(model), history))
    }

    /// Run a prediction, logging and counting the outcome
    pub fn predict(
        &self,
        input: &ApplicantInput,
        channel: &'static str,
    ) -> Result<Prediction, ApiError> {
        match self.engine.predict(input) {
            Ok(prediction) => {
                telemetry::record_prediction(channel, prediction.estimated_processing_days);
                info!(
                    channel,
                    country = %input.country,
                    visa_type = %input.visa_type,
                    days = prediction.estimated_processing_days,
                    "Prediction served"
                );
                Ok(prediction)
            }
            Err(e) => {
                telemetry::record_prediction_failure(channel);
                error!(channel, "Prediction failed: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelHealth,
    pub history: HistoryHealth,
}

#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub feature_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryHealth {
    pub record_count: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::form::index))
        .route("/predict", post(routes::predict::predict))
        .route("/form/predict", post(routes::form::predict))
        .route("/form/save", post(routes::form::save))
        .route("/history", get(routes::history::show))
        .route("/history.csv", get(routes::history::download))
        .route("/api/v1/history", get(routes::history::list))
        .route("/api/v1/health", get(health_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let record_count = state.history.lock().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelHealth {
            feature_count: state.engine.schema().len(),
        },
        history: HistoryHealth { record_count },
    })
}

/// Run the server until Ctrl+C or SIGTERM
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);

    let mut app = create_router(state).layer(TraceLayer::new_for_http());
    if let Some(handle) = telemetry::init_metrics(&config.metrics) {
        app = app.merge(telemetry::metrics_router(handle));
    }

    let addr = config.bind_address();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
