use serde::{Deserialize, Serialize};

/// One classification prediction. The classifier returns these ranked by
/// descending confidence; confidence is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationLabel {
    pub label: String,
    pub confidence: f64,
}

impl ClassificationLabel {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Wire shape of one prediction from the image-classification endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct HfClassification {
    pub label: String,
    pub score: f64,
}

impl From<HfClassification> for ClassificationLabel {
    fn from(raw: HfClassification) -> Self {
        Self {
            label: raw.label,
            confidence: raw.score,
        }
    }
}
