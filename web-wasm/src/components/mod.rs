pub mod classification_result;
pub mod error_display;
pub mod header;
pub mod image_preview;
pub mod loading_spinner;
pub mod upload_area;
