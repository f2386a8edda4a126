use crate::device_camera::interface::{CameraError, DeviceCamera};
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
    startup_delay: Duration,
    started: AtomicBool,
    frame_count: AtomicU32,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, width: u32, height: u32) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width: width.max(1),
            height: height.max(1),
            startup_delay: Duration::from_secs(1),
            started: AtomicBool::new(false),
            frame_count: AtomicU32::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn with_startup_delay(mut self, startup_delay: Duration) -> Self {
        self.startup_delay = startup_delay;
        self
    }

    /// A diagonal gradient that drifts a little every frame, with sensor noise.
    fn render_frame(&self, frame: u32) -> RgbImage {
        let shift = frame.wrapping_mul(7) % 255;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let noise: u8 = rand::random::<u8>() % 24;
            let r = ((x * 255 / self.width + shift) % 255) as u8;
            let g = (y * 255 / self.height) as u8;
            let b = 160u8;
            Rgb([
                r.saturating_add(noise),
                g.saturating_add(noise),
                b.saturating_add(noise),
            ])
        })
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        std::thread::sleep(self.startup_delay);
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

        let frame = self.frame_count.fetch_add(1, Ordering::SeqCst);
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(self.render_frame(frame))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

        Ok(ImageData::from_bytes(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_tracing::LoggerTracing;

    fn camera() -> DeviceCameraFake {
        DeviceCameraFake::new(Arc::new(LoggerTracing::new()), 64, 36)
            .with_startup_delay(Duration::ZERO)
    }

    #[test]
    fn test_render_frame_survives_long_runs() {
        let frame = camera().render_frame(u32::MAX);
        assert_eq!((frame.width(), frame.height()), (64, 36));
    }

    #[test]
    fn test_capture_requires_start() {
        let camera = camera();
        assert!(camera.capture_frame().is_err());

        camera.start().unwrap();
        let frame = camera.capture_frame().unwrap();
        assert_eq!(frame.mime(), "image/jpeg");
        let rgba = frame.decode_rgba().unwrap();
        assert_eq!((rgba.width(), rgba.height()), (64, 36));

        camera.stop().unwrap();
        assert!(camera.capture_frame().is_err());
    }
}
