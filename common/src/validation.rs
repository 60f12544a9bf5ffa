//! アップロード前のファイル検証
//!
//! 対応形式は JPEG / PNG のみ、サイズ上限は 10 MiB。
//! ブラウザとCLIで同じ判定を使う。

use thiserror::Error;

/// 受け付けるMIMEタイプ
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// 受け付ける拡張子（小文字）
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// ファイルサイズ上限（10 MiB、ちょうどは許可）
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// `<input type="file">` の accept 属性
pub const ACCEPT_ATTRIBUTE: &str = "image/jpeg,image/png,.jpg,.jpeg,.png";

/// 検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type. Only JPG and PNG formats are allowed.")]
    InvalidType,

    #[error("File too large. Please upload an image under 10MB.")]
    TooLarge,

    #[error("Filename is required. Please ensure your file has a name.")]
    MissingFileName,
}

/// MIMEタイプとサイズを検証（タイプ→サイズの順）
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(ValidationError::InvalidType);
    }

    if size > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge);
    }

    Ok(())
}

/// ファイル名（拡張子）を検証
pub fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(ValidationError::MissingFileName);
    }

    match extension_of(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::InvalidType),
    }
}

/// 拡張子からMIMEタイプを推定
///
/// ブラウザが `File.type` を空で返す場合とCLIのフォールバックで使う
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert!(validate_upload("image/jpeg", 1024).is_ok());
        assert!(validate_upload("image/png", 1024).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        assert_eq!(validate_upload("image/gif", 10), Err(ValidationError::InvalidType));
        assert_eq!(validate_upload("image/webp", 10), Err(ValidationError::InvalidType));
        assert_eq!(validate_upload("", 10), Err(ValidationError::InvalidType));
    }

    #[test]
    fn test_size_boundary() {
        assert!(validate_upload("image/png", MAX_FILE_SIZE_BYTES).is_ok());
        assert_eq!(
            validate_upload("image/png", MAX_FILE_SIZE_BYTES + 1),
            Err(ValidationError::TooLarge)
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        // 形式もサイズも不正な場合は形式エラーを優先
        assert_eq!(
            validate_upload("application/pdf", MAX_FILE_SIZE_BYTES * 2),
            Err(ValidationError::InvalidType)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidType.to_string(),
            "Invalid file type. Only JPG and PNG formats are allowed."
        );
        assert_eq!(
            ValidationError::TooLarge.to_string(),
            "File too large. Please upload an image under 10MB."
        );
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("stop.jpg").is_ok());
        assert!(validate_file_name("STOP.JPEG").is_ok());
        assert!(validate_file_name("yield.png").is_ok());
        assert_eq!(validate_file_name("sign.gif"), Err(ValidationError::InvalidType));
        assert_eq!(validate_file_name("noext"), Err(ValidationError::InvalidType));
        assert_eq!(validate_file_name(".png"), Err(ValidationError::InvalidType));
        assert_eq!(validate_file_name("  "), Err(ValidationError::MissingFileName));
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("jpg"), Some("image/jpeg"));
        assert_eq!(mime_for_extension(".JPEG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("png"), Some("image/png"));
        assert_eq!(mime_for_extension("gif"), None);
    }
}
