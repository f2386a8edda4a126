use clap::Parser;
use cli::{Args, LogFormat};
use device_camera::impl_command::{CameraCommandConfig, DeviceCameraCommand};
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::interface::DeviceCamera;
use device_file_picker::impl_rfd::DeviceFilePickerRfd;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_http::ImageClassifierHttp;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::impl_tracing::LoggerTracing;
use library::logger::interface::Logger;
use pet_classifier::main::PetClassifier;
use std::sync::Arc;

mod cli;
mod config;
mod device_camera;
mod device_file_picker;
mod image_classifier;
mod image_data;
mod library;
mod logging;
mod pet_classifier;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let args = Args::parse();
    let log_format = args.log_format;
    let fake_api = args.fake_api;
    let camera_command = args.camera_command.clone();
    let config = args.into_config();

    let logger: Arc<dyn Logger + Send + Sync> = match log_format {
        LogFormat::Console => Arc::new(LoggerConsole::new(config.logger_timezone)),
        LogFormat::Tracing => Arc::new(LoggerTracing::new()),
    };

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match camera_command {
        Some(command) => {
            let command_config =
                CameraCommandConfig::parse(&command, config.camera_width, config.camera_height)?;
            Arc::new(DeviceCameraCommand::new(command_config, logger.clone()))
        }
        None => Arc::new(DeviceCameraFake::new(
            logger.clone(),
            config.camera_width,
            config.camera_height,
        )),
    };

    let device_file_picker = Arc::new(DeviceFilePickerRfd::new(logger.clone()));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = if fake_api {
        Arc::new(ImageClassifierFake::new(logger.clone()))
    } else {
        Arc::new(ImageClassifierHttp::new(
            &config.api_url,
            config.request_timeout,
            logger.clone(),
        )?)
    };

    if fake_api {
        let _ = logger.info("Using the fake prediction API");
    } else {
        let _ = logger.info(&format!("Using prediction API at {}", config.api_url));
    }

    let pet_classifier = PetClassifier::new(
        config,
        logger,
        device_camera,
        device_file_picker,
        image_classifier,
    );

    pet_classifier::render::run_gui(pet_classifier)?;

    Ok(())
}
