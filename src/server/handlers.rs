use super::types::{ErrorResponse, GenerateResponse, HealthResponse, ModelStatus};
use super::upload::TempUpload;
use crate::Error;
use crate::pipeline::Pipeline;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Default caption length when the form omits the `length` field.
pub const DEFAULT_MAX_LENGTH: u32 = 50;

#[derive(Clone)]
pub struct AppState {
    /// Present only when both model clients came up at startup.
    pub pipeline: Option<Arc<Pipeline>>,
    pub status: ModelStatus,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.status.all_ready() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        models: state.status,
        timestamp: Utc::now(),
    })
}

pub async fn generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Some(pipeline) = state.pipeline.clone() else {
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Models not properly loaded",
        ));
    };

    let mut image: Option<(String, Vec<u8>)> = None;
    let mut max_length = DEFAULT_MAX_LENGTH;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        // `name()` borrows the field, which the body readers consume.
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
                image = Some((filename, bytes.to_vec()));
            }
            "length" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
                max_length = text
                    .trim()
                    .parse()
                    .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid length"))?;
            }
            _ => {}
        }
    }

    let Some((filename, bytes)) = image else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing image file"));
    };

    info!("Received {} byte upload: {}", bytes.len(), filename);

    let upload = TempUpload::save(&state.upload_dir, &filename, &bytes, state.max_upload_bytes)
        .await
        .map_err(|e| match e {
            Error::InvalidUpload(message) => api_error(StatusCode::BAD_REQUEST, message),
            other => api_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })?;

    let result = pipeline.describe(upload.path(), max_length).await;
    upload.cleanup().await;

    match result {
        Ok(output) => Ok(Json(GenerateResponse {
            base_caption: output.base_caption,
            labels: output.labels.into_iter().map(|l| l.label).collect(),
            enhanced_caption: output.enhanced_caption,
        })),
        Err(e) => {
            error!("Error during processing: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
