pub mod api_status_indicator;
pub mod api_test_button;
pub mod camera_capture;
pub mod image_uploader;
pub mod result_card;
pub mod status_animation;
pub mod texture_cache;
pub mod toasts;
