use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_classifier")]
    pub classifier: ModelEndpointConfig,
    #[serde(default = "default_captioner")]
    pub captioner: ModelEndpointConfig,
}

/// One Hugging Face Inference API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            classifier: default_classifier(),
            captioner: default_captioner(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_classifier() -> ModelEndpointConfig {
    ModelEndpointConfig {
        base_url: default_base_url(),
        api_key: String::new(),
        model: "google/vit-base-patch16-224".to_string(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_captioner() -> ModelEndpointConfig {
    ModelEndpointConfig {
        base_url: default_base_url(),
        api_key: String::new(),
        model: "Salesforce/blip-image-captioning-base".to_string(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_upload_dir() -> String {
    "temp_uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}
