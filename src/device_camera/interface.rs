use crate::image_data::{ImageData, ImageDataError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("camera is not started")]
    NotStarted,
    #[error("capture command is empty")]
    EmptyCommand,
    #[error("failed to run capture command {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("capture command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
    #[error("captured frame is unusable: {0}")]
    Frame(#[from] ImageDataError),
}

pub trait DeviceCamera: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Grabs a single still from the running camera.
    fn capture_frame(&self) -> Result<ImageData, Box<dyn std::error::Error + Send + Sync>>;
}
