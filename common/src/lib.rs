//! Road Sign Classifier Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod api;
pub mod error;
pub mod messages;
pub mod session;
pub mod types;
pub mod validation;

pub use api::{ApiErrorBody, Endpoints, UploadOutcome, DEFAULT_API_BASE_URL};
pub use error::{Error, Result};
pub use messages::{error_kind, format_error_message, ErrorKind};
pub use session::{Event, LoadedImage, Phase, Session};
pub use types::{ClassScore, ClassificationResult, History, StoredResult};
pub use validation::{
    mime_for_extension, validate_file_name, validate_upload, ValidationError,
    ACCEPT_ATTRIBUTE, ALLOWED_EXTENSIONS, ALLOWED_MIME_TYPES, MAX_FILE_SIZE_BYTES,
};
