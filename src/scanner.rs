//! 分類対象の画像を集める
//!
//! ファイル指定はそのまま、フォルダ指定は JPG/PNG のみを拾う。
//! 送信前にWeb版と同じ検証（形式→サイズ）を通す。

use crate::error::{ClassifierError, Result};
use road_sign_common::{mime_for_extension, validate_upload, ALLOWED_EXTENSIONS};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 形式判定に読む先頭バイト数
const SNIFF_LEN: u64 = 32;

/// 読み込み済みの画像ファイル
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// 引数のパス群から対象画像のパスを集める
pub fn collect_images(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = scan_folder(path, recursive)?;
            if found.is_empty() {
                return Err(ClassifierError::NoImagesFound(path.display().to_string()));
            }
            images.extend(found);
        } else if path.is_file() {
            images.push(path.clone());
        } else {
            return Err(ClassifierError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

/// フォルダ内の JPG/PNG をファイル名順で返す
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(ClassifierError::FileNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && has_image_extension(p))
        .collect();

    images.sort();
    Ok(images)
}

/// 画像を読み込み、検証する
pub fn load_image(path: &Path) -> Result<ImageFile> {
    if !path.is_file() {
        return Err(ClassifierError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let size = std::fs::metadata(path)?.len();
    let mime_type = detect_mime_type(path)?;

    validate_upload(&mime_type, size).map_err(|source| ClassifierError::Validation {
        file: file_name.clone(),
        source,
    })?;

    let bytes = std::fs::read(path)?;

    Ok(ImageFile {
        path: path.to_path_buf(),
        file_name,
        mime_type,
        bytes,
    })
}

/// ファイル先頭から形式を判定（判定不能なら拡張子）
pub fn detect_mime_type(path: &Path) -> Result<String> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    std::fs::File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;

    if let Ok(format) = image::guess_format(&head) {
        return Ok(format.to_mime_type().to_string());
    }

    let by_extension = path
        .extension()
        .and_then(|ext| mime_for_extension(&ext.to_string_lossy()));

    Ok(by_extension.unwrap_or("application/octet-stream").to_string())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}
