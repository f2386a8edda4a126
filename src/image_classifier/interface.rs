use crate::image_data::{ImageData, ImageDataError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Cat,
    Dog,
    Human,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Cat, Label::Dog, Label::Human];

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(label))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cat => "cat",
            Label::Dog => "dog",
            Label::Human => "human",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Label::Cat => "Cat",
            Label::Dog => "Dog",
            Label::Human => "Human",
        }
    }
}

/// Body of `GET /test`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TestResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /predict`. Servers report the label under either `result`
/// or `prediction`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("invalid image: {0}")]
    Image(#[from] ImageDataError),
    #[error("{0}")]
    Unavailable(String),
}

pub trait ImageClassifier: Send + Sync {
    fn test_connection(&self) -> Result<TestResponse, ApiError>;
    fn classify(&self, image: &ImageData) -> Result<PredictResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_is_case_insensitive() {
        assert_eq!(Label::parse("dog"), Some(Label::Dog));
        assert_eq!(Label::parse(" Cat "), Some(Label::Cat));
        assert_eq!(Label::parse("HUMAN"), Some(Label::Human));
        assert_eq!(Label::parse("hamster"), None);
        assert_eq!(Label::parse(""), None);
    }

    #[test]
    fn test_predict_response_fields_are_optional() {
        let body: PredictResponse = serde_json::from_str(r#"{"result":"dog"}"#).unwrap();
        assert_eq!(body.result.as_deref(), Some("dog"));
        assert_eq!(body.prediction, None);
        assert_eq!(body.confidence, None);

        let body: PredictResponse =
            serde_json::from_str(r#"{"prediction":"cat","confidence":0.7,"extra":1}"#).unwrap();
        assert_eq!(body.prediction.as_deref(), Some("cat"));
        assert_eq!(body.confidence, Some(0.7));
    }

    #[test]
    fn test_test_response_message_is_optional() {
        let body: TestResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message, None);
        let body: TestResponse = serde_json::from_str(r#"{"message":"pong"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("pong"));
    }
}
