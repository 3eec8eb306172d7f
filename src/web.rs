use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::{DefaultsConfig, TempViewConfig};
use crate::handlers;
use crate::pipeline::Pipeline;
use crate::weather::{OpenMeteoClient, TemperatureSource};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub defaults: Arc<DefaultsConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn TemperatureSource>, defaults: DefaultsConfig) -> Self {
        Self {
            pipeline: Pipeline::new(source),
            defaults: Arc::new(defaults),
        }
    }

    /// State backed by the real Open-Meteo client
    pub fn from_config(config: &TempViewConfig) -> crate::Result<Self> {
        let client = OpenMeteoClient::new(&config.weather)?;
        Ok(Self::new(Arc::new(client), config.defaults.clone()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/results", get(handlers::results))
        .route("/download_csv", get(handlers::download_csv))
        .route("/chart.png", get(handlers::chart_png))
        .route("/api/temperatures", get(handlers::api_temperatures))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: &TempViewConfig) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .await
        .with_context(|| "Web server terminated")?;
    Ok(())
}
