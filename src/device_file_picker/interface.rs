use std::path::PathBuf;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

pub trait DeviceFilePicker: Send + Sync {
    /// Asks the user for an image file. `Ok(None)` means the dialog was dismissed.
    fn pick_image(&self) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>>;
}
