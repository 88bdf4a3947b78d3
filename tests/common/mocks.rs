use async_trait::async_trait;
use captiond::{
    Error, Result,
    caption::ImageCaptioner,
    vision::{ClassificationLabel, ImageClassifier},
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock classifier for testing
#[derive(Debug)]
pub struct MockClassifier {
    pub results: Arc<Mutex<Vec<Vec<ClassificationLabel>>>>,
    pub requests: Arc<Mutex<Vec<(PathBuf, usize)>>>,
    pub error: Option<String>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_labels(self, labels: Vec<ClassificationLabel>) -> Self {
        self.results.lock().unwrap().push(labels);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<(PathBuf, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageClassifier for MockClassifier {
    async fn classify(&self, image: &Path, top_k: usize) -> Result<Vec<ClassificationLabel>> {
        self.requests
            .lock()
            .unwrap()
            .push((image.to_path_buf(), top_k));

        if let Some(ref error) = self.error {
            return Err(Error::model(error.clone()));
        }

        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            return Err(Error::model("No more mock classifications available"));
        }

        Ok(results.remove(0))
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock captioner for testing
#[derive(Debug)]
pub struct MockCaptioner {
    pub captions: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<(PathBuf, u32)>>>,
    pub error: Option<String>,
}

impl MockCaptioner {
    pub fn new() -> Self {
        Self {
            captions: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_caption(self, caption: impl Into<String>) -> Self {
        self.captions.lock().unwrap().push(caption.into());
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<(PathBuf, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageCaptioner for MockCaptioner {
    async fn caption(&self, image: &Path, max_length: u32) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((image.to_path_buf(), max_length));

        if let Some(ref error) = self.error {
            return Err(Error::model(error.clone()));
        }

        let mut captions = self.captions.lock().unwrap();
        if captions.is_empty() {
            return Err(Error::model("No more mock captions available"));
        }

        Ok(captions.remove(0))
    }
}

impl Default for MockCaptioner {
    fn default() -> Self {
        Self::new()
    }
}
