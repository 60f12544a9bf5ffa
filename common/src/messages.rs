//! ユーザー向けエラーメッセージの整形
//!
//! バックエンドやネットワークから返った生のエラー文を、
//! 画面に出せる文言へ寄せる。該当パターンがなければそのまま返す。

use regex::Regex;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const INVALID_TYPE: &str = "Invalid file type. Only JPG and PNG image formats are allowed.";
pub const FILE_TOO_LARGE: &str =
    "File size exceeds the maximum allowed size of 10 MB. Please upload a smaller image.";
pub const MISSING_FILENAME: &str = "Filename is required. Please ensure your file has a name.";
pub const NETWORK_ERROR: &str =
    "Network error occurred. Please check your internet connection and try again.";
pub const UPLOAD_NETWORK_ERROR: &str =
    "Network error: Failed to upload image. Please check your connection.";
pub const NO_IMAGE: &str = "No image available for classification";
pub const READ_FAILED: &str = "Failed to read the selected file.";

pub const UPLOAD_FAILED: &str = "Failed to upload image";
pub const CLASSIFY_FAILED: &str = "Failed to classify image";
pub const RESULT_FAILED: &str = "Failed to get classification result";
pub const HISTORY_FAILED: &str = "Failed to get classification history";

/// エラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileType,
    FileSize,
    MissingFilename,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FileType => "file_type",
            ErrorKind::FileSize => "file_size",
            ErrorKind::MissingFilename => "missing_filename",
            ErrorKind::Unknown => "unknown",
        }
    }
}

/// 生のエラー文を表示用に整形
pub fn format_error_message(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    let lower = raw.to_lowercase();

    if lower.contains("invalid") && (lower.contains("type") || lower.contains("format")) {
        return INVALID_TYPE.to_string();
    }

    if is_size_error(&lower) {
        return match extract_size_mb(raw) {
            Some(size) => format!(
                "File size ({} MB) exceeds the maximum allowed size of 10 MB. Please upload a smaller image.",
                size
            ),
            None => FILE_TOO_LARGE.to_string(),
        };
    }

    if is_missing_filename(&lower) {
        return MISSING_FILENAME.to_string();
    }

    raw.to_string()
}

/// エラー文を分類
pub fn error_kind(raw: &str) -> ErrorKind {
    if raw.is_empty() {
        return ErrorKind::Unknown;
    }

    let lower = raw.to_lowercase();

    if lower.contains("type") || lower.contains("format") || lower.contains("extension") {
        ErrorKind::FileType
    } else if is_size_error(&lower) {
        ErrorKind::FileSize
    } else if is_missing_filename(&lower) {
        ErrorKind::MissingFilename
    } else {
        ErrorKind::Unknown
    }
}

fn is_size_error(lower: &str) -> bool {
    lower.contains("size") || lower.contains("large") || lower.contains("exceeds")
}

fn is_missing_filename(lower: &str) -> bool {
    lower.contains("filename") && lower.contains("required")
}

/// "12.5 MB" のような表記から数値部分を取り出す
fn extract_size_mb(raw: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref SIZE_RE: Regex = Regex::new(r"(?i)(\d+\.?\d*)\s*MB").unwrap();
    }

    SIZE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
