mod client;
mod types;

pub use client::{HfImageClassifier, ImageClassifier};
pub use types::ClassificationLabel;
