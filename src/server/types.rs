use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub base_caption: String,
    pub labels: Vec<String>,
    pub enhanced_caption: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub models: ModelStatus,
    pub timestamp: DateTime<Utc>,
}

/// Which models came up at startup. The enhancer has no external
/// dependencies, so it is always ready.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelStatus {
    pub classifier: bool,
    pub captioner: bool,
    pub enhancer: bool,
}

impl ModelStatus {
    pub fn all_ready(&self) -> bool {
        self.classifier && self.captioner && self.enhancer
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
