use road_sign_common::{error_kind, ErrorKind, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No JPG or PNG images found in {0}")]
    NoImagesFound(String),

    #[error("{file}: {source}")]
    Validation {
        file: String,
        #[source]
        source: ValidationError,
    },

    #[error("{0}")]
    Network(String),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Unexpected response from classification service: {0}")]
    UnexpectedResponse(String),

    #[error("{failed} of {total} images could not be classified")]
    PartialFailure { failed: usize, total: usize },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClassifierError {
    /// エラー分類（ファイル名やHTTPステータスを除いた本文で判定）
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifierError::Validation { source, .. } => match source {
                ValidationError::InvalidType => ErrorKind::FileType,
                ValidationError::TooLarge => ErrorKind::FileSize,
                ValidationError::MissingFileName => ErrorKind::MissingFilename,
            },
            ClassifierError::Api { message, .. } => error_kind(message),
            _ => ErrorKind::Unknown,
        }
    }
}

impl From<road_sign_common::Error> for ClassifierError {
    fn from(err: road_sign_common::Error) -> Self {
        match err {
            road_sign_common::Error::Json(e) => ClassifierError::JsonParse(e),
            road_sign_common::Error::UnexpectedResponse(msg) => ClassifierError::UnexpectedResponse(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
