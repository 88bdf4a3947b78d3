use crate::Result;
use crate::caption::{CaptionResult, ImageCaptioner};
use crate::enhancer::CaptionEnhancer;
use crate::vision::{ClassificationLabel, ImageClassifier};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Number of classification labels requested per image.
pub const TOP_K: usize = 5;

/// Fallback text when the enhancer rejects its input.
const ENHANCEMENT_FALLBACK: &str = "Enhancement failed.";

/// Classify → caption → enhance, with injected model collaborators.
pub struct Pipeline {
    classifier: Arc<dyn ImageClassifier>,
    captioner: Arc<dyn ImageCaptioner>,
    enhancer: CaptionEnhancer,
}

/// Combined output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub base_caption: String,
    pub labels: Vec<ClassificationLabel>,
    pub enhanced_caption: String,
    pub used_labels: Vec<String>,
}

impl Pipeline {
    pub fn new(classifier: Arc<dyn ImageClassifier>, captioner: Arc<dyn ImageCaptioner>) -> Self {
        Self {
            classifier,
            captioner,
            enhancer: CaptionEnhancer::new(),
        }
    }

    /// Runs the full pipeline on a spooled image. Classifier failure
    /// aborts the request; captioner and enhancer failures degrade so a
    /// partial answer still comes back.
    pub async fn describe(&self, image: &Path, max_length: u32) -> Result<PipelineOutput> {
        info!("Classifying image...");
        let labels = self.classifier.classify(image, TOP_K).await?;

        info!("Generating base caption...");
        let caption_result = match self.captioner.caption(image, max_length).await {
            Ok(caption) => CaptionResult::Caption { caption },
            Err(e) => {
                warn!("Caption generation failed, continuing with labels only: {}", e);
                CaptionResult::Failure {
                    error: e.to_string(),
                }
            }
        };
        let base_caption = caption_result.caption().unwrap_or_default().to_string();

        info!("Enhancing caption...");
        let (enhanced_caption, used_labels) =
            match self.enhancer.enhance(caption_result, labels.iter().cloned()) {
                Ok(enhancement) => (enhancement.enhanced_caption, enhancement.used_labels),
                Err(e) => {
                    warn!("{}", e);
                    (ENHANCEMENT_FALLBACK.to_string(), Vec::new())
                }
            };

        info!("Enhanced Caption: {}", enhanced_caption);

        Ok(PipelineOutput {
            base_caption,
            labels,
            enhanced_caption,
            used_labels,
        })
    }
}
