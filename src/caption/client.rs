use super::types::HfGeneratedText;
use crate::{Error, Result, config::ModelEndpointConfig};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait ImageCaptioner: Send + Sync {
    /// Generates a raw natural-language caption for the image on disk,
    /// capped at `max_length` new tokens.
    async fn caption(&self, image: &Path, max_length: u32) -> Result<String>;
}

/// Captioner backed by the Hugging Face image-to-text inference endpoint
/// (Salesforce/blip-image-captioning-base by default).
pub struct HfImageCaptioner {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HfImageCaptioner {
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
impl ImageCaptioner for HfImageCaptioner {
    async fn caption(&self, image: &Path, max_length: u32) -> Result<String> {
        let bytes = tokio::fs::read(image).await?;

        debug!("Captioning {} byte image via {}", bytes.len(), self.url);

        let payload = serde_json::json!({
            "inputs": BASE64.encode(&bytes),
            "parameters": { "max_new_tokens": max_length },
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
                "Caption generation failed: endpoint returned {status}: {body}"
            )));
        }

        let candidates: Vec<HfGeneratedText> = response.json().await?;

        candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| Error::model("Caption generation failed: model returned no candidates"))
    }
}
