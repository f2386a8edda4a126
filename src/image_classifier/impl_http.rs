use crate::image_classifier::interface::{ApiError, ImageClassifier, PredictResponse, TestResponse};
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const UPLOAD_FILE_NAME: &str = "image.jpg";

/// Talks to the remote prediction API over HTTP.
pub struct ImageClassifierHttp {
    api_url: String,
    client: Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(
        api_url: &str,
        timeout: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                url: api_url.to_string(),
                source,
            })?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
            logger: logger.with_namespace("image_classifier").with_namespace("http"),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;

        Ok(serde_json::from_str(&body)?)
    }
}

impl ImageClassifier for ImageClassifierHttp {
    fn test_connection(&self) -> Result<TestResponse, ApiError> {
        let url = self.endpoint("test");
        let _ = self.logger.info(&format!("GET {}", url));

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        Self::read_json(&url, response)
    }

    fn classify(&self, image: &ImageData) -> Result<PredictResponse, ApiError> {
        let url = self.endpoint("predict");
        let bytes = image.to_bytes()?;
        let _ = self.logger.info(&format!(
            "POST {} ({} bytes, {})",
            url,
            bytes.len(),
            image.mime()
        ));

        let part = Part::bytes(bytes)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(image.mime())
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        Self::read_json(&url, response)
    }
}
