use crate::image_classifier::interface::{
    ApiError, ImageClassifier, Label, PredictResponse, TestResponse,
};
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use rand::seq::IndexedRandom;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Stands in for the prediction API. Picks a random label unless one is fixed.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    delay: Duration,
    label: Option<Label>,
    offline: bool,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            delay: Duration::from_millis(800),
            label: None,
            offline: false,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    #[allow(dead_code)]
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), ApiError> {
        std::thread::sleep(self.delay);
        if self.offline {
            return Err(ApiError::Unavailable("fake API is offline".to_string()));
        }
        Ok(())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn test_connection(&self) -> Result<TestResponse, ApiError> {
        let _ = self.logger.info("Testing connection...");
        self.ensure_online()?;
        Ok(TestResponse {
            message: Some("Fake classifier is ready".to_string()),
        })
    }

    fn classify(&self, image: &ImageData) -> Result<PredictResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!("Classifying {:?}...", image));
        self.ensure_online()?;

        let mut rng = rand::rng();
        let label = match self.label {
            Some(label) => label,
            None => *Label::ALL.choose(&mut rng).unwrap_or(&Label::Dog),
        };
        let confidence_dist =
            Uniform::new(0.5_f32, 1.0).map_err(|e| ApiError::Unavailable(e.to_string()))?;

        Ok(PredictResponse {
            result: Some(label.as_str().to_string()),
            prediction: None,
            confidence: Some(confidence_dist.sample(&mut rng)),
        })
    }
}
