pub mod handlers;
pub mod types;
pub mod upload;

pub use handlers::AppState;
pub use types::ModelStatus;

use crate::caption::HfImageCaptioner;
use crate::pipeline::Pipeline;
use crate::vision::HfImageClassifier;
use crate::{Result, config::Config};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Headroom over the upload cap so oversize uploads reach the explicit
/// size check instead of a transport-level rejection.
const BODY_LIMIT_HEADROOM: usize = 64 * 1024;

/// Builds the model clients once and records per-model readiness. A
/// failed client leaves the service up but degraded.
pub fn build_state(config: &Config) -> AppState {
    let classifier = HfImageClassifier::new(config.models.classifier.clone())
        .map_err(|e| error!("Classifier setup failed: {}", e))
        .ok();
    let captioner = HfImageCaptioner::new(config.models.captioner.clone())
        .map_err(|e| error!("Captioner setup failed: {}", e))
        .ok();

    let status = ModelStatus {
        classifier: classifier.is_some(),
        captioner: captioner.is_some(),
        enhancer: true,
    };

    let pipeline = match (classifier, captioner) {
        (Some(classifier), Some(captioner)) => Some(Arc::new(Pipeline::new(
            Arc::new(classifier),
            Arc::new(captioner),
        ))),
        _ => None,
    };

    if pipeline.is_some() {
        info!("Models loaded successfully.");
    }

    AppState {
        pipeline,
        status,
        upload_dir: PathBuf::from(&config.server.upload_dir),
        max_upload_bytes: config.server.max_upload_bytes,
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes + BODY_LIMIT_HEADROOM;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate", post(handlers::generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    tokio::fs::create_dir_all(&config.server.upload_dir).await?;

    let state = build_state(&config);
    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
