use super::types::{ClassificationLabel, HfClassification};
use crate::{Error, Result, config::ModelEndpointConfig};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classifies the image on disk and returns up to `top_k` labels with
    /// confidence scores, ranked descending.
    async fn classify(&self, image: &Path, top_k: usize) -> Result<Vec<ClassificationLabel>>;
}

/// Classifier backed by the Hugging Face image-classification inference
/// endpoint (google/vit-base-patch16-224 by default).
pub struct HfImageClassifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HfImageClassifier {
    pub fn new(config: ModelEndpointConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!(
                "{}/models/{}",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl ImageClassifier for HfImageClassifier {
    async fn classify(&self, image: &Path, top_k: usize) -> Result<Vec<ClassificationLabel>> {
        let bytes = tokio::fs::read(image).await?;

        debug!("Classifying {} byte image via {}", bytes.len(), self.url);

        let payload = serde_json::json!({
            "inputs": BASE64.encode(&bytes),
            "parameters": { "top_k": top_k },
        });

        let mut request = self.client.post(&self.url).json(&payload);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::model(format!(
                "Classification failed: endpoint returned {status}: {body}"
            )));
        }

        let predictions: Vec<HfClassification> = response.json().await?;

        Ok(predictions
            .into_iter()
            .take(top_k)
            .map(ClassificationLabel::from)
            .collect())
    }
}
