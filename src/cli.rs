use crate::config::{Config, DEFAULT_API_URL};
use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Timestamped lines on stdout/stderr.
    Console,
    /// Events through the `tracing` subscriber.
    Tracing,
}

/// Desktop front-end for the pet image classifier API.
#[derive(Debug, Parser)]
#[command(name = "pet-classifier")]
#[command(about = "Classify photos of cats, dogs and humans", long_about = None)]
pub struct Args {
    /// Base URL of the prediction API.
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Give up on an API request after this many seconds.
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub request_timeout_secs: u64,

    /// Use a built-in fake instead of calling the API.
    #[arg(long)]
    pub fake_api: bool,

    /// Program that writes one JPEG or PNG frame to stdout, e.g.
    /// `fswebcam --no-banner -r {width}x{height} -`. A synthetic camera is used when unset.
    #[arg(long, env = "PET_CLASSIFIER_CAMERA_COMMAND")]
    pub camera_command: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Console)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn into_config(self) -> Config {
        Config {
            api_url: self.api_url,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..Config::default()
        }
    }
}
