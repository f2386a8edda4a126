use crate::device_file_picker::interface::{DeviceFilePicker, IMAGE_EXTENSIONS};
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

/// Native open-file dialog.
pub struct DeviceFilePickerRfd {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceFilePickerRfd {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("file_picker").with_namespace("rfd"),
        }
    }
}

impl DeviceFilePicker for DeviceFilePickerRfd {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Opening file dialog")?;

        let picked = rfd::FileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file();

        match &picked {
            Some(path) => self.logger.info(&format!("Picked {}", path.display()))?,
            None => self.logger.info("File dialog dismissed")?,
        }

        Ok(picked)
    }
}
