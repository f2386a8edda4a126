use crate::device_camera::interface::{CameraError, DeviceCamera};
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An external program that writes one JPEG or PNG still to stdout, e.g.
/// `ffmpeg -f v4l2 -video_size {width}x{height} -i /dev/video0 -frames:v 1 -f image2pipe -vcodec mjpeg -`.
/// `{width}` and `{height}` in arguments are replaced with the capture size.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraCommandConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl CameraCommandConfig {
    pub fn parse(command: &str, width: u32, height: u32) -> Result<Self, CameraError> {
        let mut parts = command.split_whitespace().map(|part| {
            part.replace("{width}", &width.to_string())
                .replace("{height}", &height.to_string())
        });
        let program = parts.next().ok_or(CameraError::EmptyCommand)?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

pub struct DeviceCameraCommand {
    config: CameraCommandConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    started: AtomicBool,
}

impl DeviceCameraCommand {
    pub fn new(config: CameraCommandConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("camera").with_namespace("command"),
            started: AtomicBool::new(false),
        }
    }

    fn run_capture(&self) -> Result<ImageData, CameraError> {
        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CameraError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CameraError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(ImageData::from_bytes(&output.stdout)?)
    }
}

impl DeviceCamera for DeviceCameraCommand {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Probing capture command {:?}", self.config.program))?;
        // A first capture proves the device is there and warms it up.
        self.run_capture()?;
        self.started.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.started.store(false, Ordering::SeqCst);
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<ImageData, Box<dyn std::error::Error + Send + Sync>> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(Box::new(CameraError::NotStarted));
        }
        Ok(self.run_capture()?)
    }
}
