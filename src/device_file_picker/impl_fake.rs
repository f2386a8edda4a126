use crate::device_file_picker::interface::DeviceFilePicker;
use std::path::PathBuf;
use std::sync::Mutex;

/// Returns a preset answer instead of opening a dialog.
pub struct DeviceFilePickerFake {
    answer: Mutex<Option<PathBuf>>,
}

impl DeviceFilePickerFake {
    pub fn new(answer: Option<PathBuf>) -> Self {
        Self {
            answer: Mutex::new(answer),
        }
    }
}

impl DeviceFilePicker for DeviceFilePickerFake {
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let answer = self.answer.lock().map_err(|e| e.to_string())?;
        Ok(answer.clone())
    }
}
