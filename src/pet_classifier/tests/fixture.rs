use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_file_picker::impl_fake::DeviceFilePickerFake;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::interface::Label;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::pet_classifier::core::{ApiStatus, State};
use crate::pet_classifier::main::PetClassifier;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct Fixture {
    pub image_classifier: Arc<ImageClassifierFake>,
    pub pet_classifier: PetClassifier,
}

impl Fixture {
    pub fn new(picked_file: Option<PathBuf>) -> Self {
        Self::with_classifier(picked_file, |classifier| classifier.with_label(Label::Dog))
    }

    pub fn with_classifier(
        picked_file: Option<PathBuf>,
        build: impl FnOnce(ImageClassifierFake) -> ImageClassifierFake,
    ) -> Self {
        let config = Config {
            tick_rate: Duration::from_millis(10),
            camera_preview_rate: Duration::from_millis(20),
            ..Config::default()
        };
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger_timezone));
        let device_camera = Arc::new(
            DeviceCameraFake::new(logger.clone(), 64, 48).with_startup_delay(Duration::ZERO),
        );
        let device_file_picker = Arc::new(DeviceFilePickerFake::new(picked_file));
        let image_classifier = Arc::new(build(
            ImageClassifierFake::new(logger.clone()).with_delay(Duration::ZERO),
        ));

        let pet_classifier = PetClassifier::new(
            config,
            logger,
            device_camera,
            device_file_picker,
            image_classifier.clone(),
        );

        Self {
            image_classifier,
            pet_classifier,
        }
    }

    /// Starts the loop and returns once the start-up connectivity check settled.
    pub fn start(&self) {
        self.pet_classifier.start(Arc::new(|| {})).unwrap();
        self.wait_for(|state| {
            state.api_status != ApiStatus::Unknown
                && state.api_status != ApiStatus::Checking
        });
    }

    /// Polls the model until `done` holds, panicking after a few seconds.
    pub fn wait_for(&self, done: impl Fn(&State) -> bool) -> State {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let state = self.pet_classifier.snapshot();
            if done(&state) {
                return state;
            }
            assert!(Instant::now() < deadline, "timed out, last state: {:?}", state);
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}
