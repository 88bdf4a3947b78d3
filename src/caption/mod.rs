mod client;
mod types;

pub use client::{HfImageCaptioner, ImageCaptioner};
pub use types::CaptionResult;
