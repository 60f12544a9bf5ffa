//! 分類バックエンドとの通信契約
//!
//! エンドポイントURLの組み立てとレスポンス解釈のみを扱う。
//! 実際のHTTP送信はCLI(reqwest)とWeb(fetch)がそれぞれ行う。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::messages::format_error_message;
use crate::types::ClassificationResult;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// multipartのファイルフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// パスセグメントでエンコードしない文字（RFC 3986 unreserved）
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// エンドポイント一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_BASE_URL } else { trimmed };
        Self { base_url: base_url.to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload(&self) -> String {
        format!("{}/api/upload/", self.base_url)
    }

    pub fn classify(&self) -> String {
        format!("{}/api/classification/classify", self.base_url)
    }

    pub fn result(&self, image_id: &str) -> String {
        format!(
            "{}/api/classification/results/{}",
            self.base_url,
            utf8_percent_encode(image_id, PATH_SEGMENT_SET)
        )
    }

    pub fn history(&self) -> String {
        format!("{}/api/classification/history", self.base_url)
    }
}

/// 分類リクエスト本文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub image_id: String,
}

/// アップロード結果の解釈
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// アップロードと同時に分類まで返すバックエンド
    Classified(ClassificationResult),
    /// 画像IDのみ返るので分類APIを別途呼ぶ
    Stored { image_id: String },
}

impl UploadOutcome {
    /// アップロードレスポンスのJSONを解釈
    pub fn from_value(value: Value) -> Result<Self> {
        if value.get("classification").is_some() {
            let result: ClassificationResult = serde_json::from_value(value)?;
            return Ok(UploadOutcome::Classified(result));
        }

        let image_id = value
            .get("image_id")
            .or_else(|| value.get("id"))
            .and_then(id_to_string);

        match image_id {
            Some(image_id) => Ok(UploadOutcome::Stored { image_id }),
            None => Err(Error::UnexpectedResponse(
                "upload response has neither a classification nor an image_id".to_string(),
            )),
        }
    }
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// エラーレスポンス本文
///
/// FastAPIは `detail` を文字列または `[{loc, msg, type}]` で返す
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// 本文テキストからパース（JSONでなければ空扱い）
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// 生のエラー文（detail → message → fallback）
    pub fn raw_message(&self, fallback: &str) -> String {
        self.detail
            .as_ref()
            .and_then(detail_text)
            .or_else(|| self.message.clone().filter(|m| !m.is_empty()))
            .unwrap_or_else(|| fallback.to_string())
    }

    /// 表示用のエラー文
    pub fn user_message(&self, fallback: &str) -> String {
        format_error_message(&self.raw_message(fallback))
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
