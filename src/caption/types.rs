use serde::{Deserialize, Serialize};

/// Outcome of caption generation: either a caption or a failure note.
/// Downstream consumers treat a failure as "no caption" rather than
/// aborting the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptionResult {
    Caption { caption: String },
    Failure { error: String },
}

impl CaptionResult {
    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Caption { caption } => Some(caption),
            Self::Failure { .. } => None,
        }
    }
}

/// Wire shape of one candidate from the image-to-text endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct HfGeneratedText {
    pub generated_text: String,
}
