//! 分類結果の型定義
//!
//! バックエンドが返すJSONをそのまま受ける:
//! - ClassificationResult: `{classification, confidence, all_classes}`
//! - StoredResult: 結果照会APIのレスポンス
//! - History: 履歴APIのレスポンス

use serde::{Deserialize, Serialize};

/// 候補クラスごとの確信度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub sign: String,
    pub confidence: f64,
}

/// 分類結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 予測された標識名
    pub classification: String,

    /// 確信度 (0.0〜1.0)
    pub confidence: f64,

    #[serde(default)]
    pub all_classes: Vec<ClassScore>,
}

impl ClassificationResult {
    /// 確信度をパーセント表記で返す（例: "95.3%"）
    pub fn confidence_percent(&self) -> String {
        confidence_percent(self.confidence)
    }

    /// 候補を確信度の高い順に並べて返す
    pub fn ranked_classes(&self) -> Vec<ClassScore> {
        let mut classes = self.all_classes.clone();
        classes.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        classes
    }
}

/// 確信度 (0.0〜1.0) をパーセント表記に変換
pub fn confidence_percent(confidence: f64) -> String {
    let clamped = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
    format!("{:.1}%", clamped * 100.0)
}

/// 保存済みの分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub image_id: String,

    #[serde(flatten)]
    pub result: ClassificationResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// 分類履歴
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub history: Vec<StoredResult>,
}
