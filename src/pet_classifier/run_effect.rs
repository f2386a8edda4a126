use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_file_picker::interface::DeviceFilePicker;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use crate::pet_classifier::core::{Effect, ImageSource, Msg};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    device_file_picker: Arc<dyn DeviceFilePicker + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    event_sender: Sender<Msg>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_file_picker: Arc<dyn DeviceFilePicker + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        event_sender: Sender<Msg>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("run_effect"),
            device_camera,
            device_file_picker,
            image_classifier,
            event_sender,
        }
    }

    fn send(&self, msg: Msg) {
        if self.event_sender.send(msg).is_err() {
            let _ = self.logger.error("Event loop is gone, dropping message");
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        if effect != Effect::CapturePreview {
            let _ = self.logger.info(&format!("Running effect: {:?}", effect));
        }

        match effect {
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Msg::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::PickFile => {
                let picked = self.device_file_picker.pick_image();
                self.send(Msg::FilePicked(picked));
            }
            Effect::LoadImage { source } => {
                let loaded = load_image(&source);
                if let Err(e) = &loaded {
                    let _ = self
                        .logger
                        .info(&format!("Ignoring {:?}: {}", source, e));
                }
                self.send(Msg::ImageLoaded(loaded));
            }
            Effect::StartCamera => {
                let started = self.device_camera.start();
                self.send(Msg::CameraStartDone(started));
            }
            Effect::StopCamera => {
                if let Err(e) = self.device_camera.stop() {
                    let _ = self.logger.error(&format!("Failed to stop camera: {}", e));
                }
            }
            Effect::CapturePreview => {
                let frame = self.device_camera.capture_frame();
                self.send(Msg::PreviewCaptured(frame));
            }
            Effect::Classify { generation, image } => {
                let response = self.image_classifier.classify(&image);
                if let Err(e) = &response {
                    let _ = self.logger.error(&format!("Classification failed: {}", e));
                }
                self.send(Msg::ClassifyDone {
                    generation,
                    response,
                });
            }
            Effect::CheckApi => {
                let response = self.image_classifier.test_connection();
                if let Err(e) = &response {
                    let _ = self.logger.error(&format!("API check failed: {}", e));
                }
                self.send(Msg::ApiCheckDone(response));
            }
        }
    }
}

fn load_image(source: &ImageSource) -> Result<ImageData, Box<dyn std::error::Error + Send + Sync>> {
    let image = match source {
        ImageSource::Path(path) => ImageData::from_bytes(&std::fs::read(path)?)?,
        ImageSource::Bytes(bytes) => ImageData::from_bytes(bytes)?,
    };
    Ok(image)
}
