use chrono::Offset;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
    /// Confidence reported when the prediction response carries none.
    pub default_confidence: f32,
    pub tick_rate: Duration,
    pub toast_duration: Duration,
    pub camera_preview_rate: Duration,
    pub camera_width: u32,
    pub camera_height: u32,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            default_confidence: 0.95,
            tick_rate: Duration::from_millis(100),
            toast_duration: Duration::from_secs(5),
            camera_preview_rate: Duration::from_millis(500),
            camera_width: 1280,
            camera_height: 720,
            logger_timezone: local_offset(),
        }
    }
}

fn local_offset() -> chrono::FixedOffset {
    chrono::Local::now().offset().fix()
}
