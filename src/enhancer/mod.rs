//! Rule-based caption rewriting.
//!
//! Takes the raw output of the captioning model plus the ranked
//! classification labels and produces a cleaned, contextually augmented
//! caption. Purely computational: no I/O, no randomness, no shared state.

use crate::caption::CaptionResult;
use crate::vision::ClassificationLabel;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Boilerplate openers stripped from the start of a model caption.
const BOILERPLATE_PREFIXES: [&str; 3] = ["a photo of", "an image of", "a picture of"];

/// Filler labels that carry no descriptive value.
const GENERIC_LABELS: [&str; 5] = ["object", "item", "thing", "stuff", "other"];

/// Labels at or below this confidence are ignored entirely.
const MIN_CONFIDENCE: f64 = 0.1;

const MAX_RELEVANT_LABELS: usize = 5;
const MAX_USED_LABELS: usize = 3;

/// Caption input accepted by [`CaptionEnhancer::enhance`]: either a bare
/// string or the structured output of the captioning model. A model
/// failure degrades to an empty caption instead of aborting enhancement.
#[derive(Debug, Clone)]
pub enum RawCaption {
    Text(String),
    Model(CaptionResult),
}

impl RawCaption {
    fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Model(result) => result.caption().unwrap_or(""),
        }
    }
}

impl From<String> for RawCaption {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawCaption {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<CaptionResult> for RawCaption {
    fn from(result: CaptionResult) -> Self {
        Self::Model(result)
    }
}

/// Output of one enhancement run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enhancement {
    pub original_caption: String,
    pub enhanced_caption: String,
    pub used_labels: Vec<String>,
}

/// Stateless caption rewriter. A single instance may be shared across
/// request handlers without locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptionEnhancer;

impl CaptionEnhancer {
    pub fn new() -> Self {
        Self
    }

    /// Rewrites a raw caption using the ranked classification labels:
    /// strips a boilerplate opener, capitalizes the first letter, appends
    /// a "related to" sentence for the best label not already present in
    /// the caption, and normalizes whitespace and terminal punctuation.
    ///
    /// Labels with confidence at or below 0.1 are ignored. A label whose
    /// confidence is non-finite or outside [0, 1] fails the whole call;
    /// no partially enhanced result is ever returned.
    pub fn enhance<I>(&self, raw: impl Into<RawCaption>, labels: I) -> Result<Enhancement>
    where
        I: IntoIterator<Item = ClassificationLabel>,
    {
        let raw = raw.into();
        let original = raw.text().to_string();

        let labels = confident_labels(labels)?;

        let mut caption = capitalize(strip_boilerplate(&original));

        let relevant = relevant_labels(&labels, &caption);

        // Empty captions get no augmentation and stay empty.
        if !caption.is_empty() {
            if let Some(top) = relevant.first() {
                let top = top.replace('_', " ");
                if !caption.to_lowercase().contains(&top.to_lowercase()) {
                    caption = format!(
                        "{}. This appears to be related to {}.",
                        caption.trim_end_matches('.'),
                        top
                    );
                }
            }
        }

        let enhanced = clean_caption(&caption);

        let mut used_labels = relevant;
        used_labels.truncate(MAX_USED_LABELS);

        Ok(Enhancement {
            original_caption: original,
            enhanced_caption: enhanced,
            used_labels,
        })
    }
}

/// Keeps the labels that clear the confidence floor, preserving order.
/// A confidence outside [0, 1] means the classifier output is malformed
/// and fails the enhancement.
fn confident_labels<I>(labels: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = ClassificationLabel>,
{
    let mut kept = Vec::new();

    for entry in labels {
        if !entry.confidence.is_finite() || !(0.0..=1.0).contains(&entry.confidence) {
            return Err(Error::enhancement(format!(
                "confidence {} for label '{}' is outside [0, 1]",
                entry.confidence, entry.label
            )));
        }
        if entry.confidence > MIN_CONFIDENCE {
            kept.push(entry.label);
        }
    }

    Ok(kept)
}

/// Drops generic filler labels, then labels whose constituent words
/// (underscores split apart, lower-cased) already occur as whitespace
/// tokens of the caption. Order is preserved; at most five survive.
fn relevant_labels(labels: &[String], caption: &str) -> Vec<String> {
    let caption_lower = caption.to_lowercase();
    let caption_words: HashSet<&str> = caption_lower.split_whitespace().collect();

    labels
        .iter()
        .filter(|label| !GENERIC_LABELS.contains(&label.to_lowercase().as_str()))
        .filter(|label| {
            let words = label.to_lowercase().replace('_', " ");
            words
                .split_whitespace()
                .all(|word| !caption_words.contains(word))
        })
        .take(MAX_RELEVANT_LABELS)
        .cloned()
        .collect()
}

/// Strips one leading boilerplate opener (ASCII case-insensitive) plus
/// any whitespace that follows it. Anchored at the start only.
fn strip_boilerplate(caption: &str) -> &str {
    for prefix in BOILERPLATE_PREFIXES {
        if caption.len() >= prefix.len()
            && caption.is_char_boundary(prefix.len())
            && caption[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return caption[prefix.len()..].trim_start();
        }
    }
    caption
}

/// Upper-cases the first character, leaving the rest untouched.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Collapses whitespace runs to a single space and period runs to a
/// single period, ensures a terminating `.`, `!` or `?`, and trims.
/// Idempotent; the empty string stays empty.
fn clean_caption(caption: &str) -> String {
    let mut spaced = String::with_capacity(caption.len() + 1);
    let mut in_space = false;
    for c in caption.chars() {
        if c.is_whitespace() {
            if !in_space {
                spaced.push(' ');
            }
            in_space = true;
        } else {
            spaced.push(c);
            in_space = false;
        }
    }

    let mut cleaned = String::with_capacity(spaced.len() + 1);
    let mut in_period = false;
    for c in spaced.chars() {
        if c == '.' {
            if !in_period {
                cleaned.push('.');
            }
            in_period = true;
        } else {
            cleaned.push(c);
            in_period = false;
        }
    }

    if !cleaned.is_empty() && !cleaned.ends_with(['.', '!', '?']) {
        cleaned.push('.');
    }

    cleaned.trim().to_string()
}
