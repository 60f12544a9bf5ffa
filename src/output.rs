//! 分類結果の表示整形

use crate::error::ClassifierError;
use road_sign_common::{ClassificationResult, History, StoredResult};
use serde::Serialize;

/// `--json` 出力の1件分
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub file: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ClassificationResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// file_type / file_size / missing_filename / unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl ClassifyReport {
    pub fn success(file: &str, result: ClassificationResult) -> Self {
        Self { file: file.to_string(), result: Some(result), error: None, error_kind: None }
    }

    pub fn failure(file: &str, error: &ClassifierError) -> Self {
        Self {
            file: file.to_string(),
            result: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind().as_str()),
        }
    }
}

/// 分類結果を人が読む形式にする（候補は上位 `top` 件）
pub fn render_result(file_name: &str, result: &ClassificationResult, top: usize) -> String {
    let mut lines = vec![
        file_name.to_string(),
        format!("  Predicted sign: {}", result.classification),
        format!("  Confidence:     {}", result.confidence_percent()),
    ];

    let ranked = result.ranked_classes();
    if !ranked.is_empty() && top > 0 {
        lines.push("  All predictions:".to_string());
        for class in ranked.iter().take(top) {
            lines.push(format!(
                "    {:<28} {:>6}",
                class.sign,
                road_sign_common::types::confidence_percent(class.confidence)
            ));
        }
        if ranked.len() > top {
            lines.push(format!("    ... {} more", ranked.len() - top));
        }
    }

    lines.join("\n")
}

pub fn render_stored(stored: &StoredResult) -> String {
    let mut text = render_result(&format!("image {}", stored.image_id), &stored.result, usize::MAX);
    if let Some(status) = &stored.status {
        text.push_str(&format!("\n  Status:         {}", status));
    }
    text
}

pub fn render_history(history: &History) -> String {
    if history.history.is_empty() {
        return "No classifications yet.".to_string();
    }

    history
        .history
        .iter()
        .map(|entry| {
            format!(
                "{:<24} {:<28} {:>6}",
                entry.image_id,
                entry.result.classification,
                entry.result.confidence_percent()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_sign_common::{ClassScore, ValidationError};

    fn sample() -> ClassificationResult {
        ClassificationResult {
            classification: "Stop".to_string(),
            confidence: 0.912,
            all_classes: vec![
                ClassScore { sign: "Yield".to_string(), confidence: 0.03 },
                ClassScore { sign: "Stop".to_string(), confidence: 0.912 },
                ClassScore { sign: "No Entry".to_string(), confidence: 0.058 },
            ],
        }
    }

    #[test]
    fn test_render_result() {
        let text = render_result("stop.png", &sample(), 2);
        assert!(text.starts_with("stop.png"));
        assert!(text.contains("Predicted sign: Stop"));
        assert!(text.contains("Confidence:     91.2%"));
        // 上位2件のみ、確信度順
        let stop_pos = text.find("    Stop").unwrap();
        let no_entry_pos = text.find("    No Entry").unwrap();
        assert!(stop_pos < no_entry_pos);
        assert!(!text.contains("    Yield"));
        assert!(text.contains("... 1 more"));
    }

    #[test]
    fn test_render_result_without_candidates() {
        let result = ClassificationResult {
            classification: "Speed Limit 60".to_string(),
            confidence: 0.95,
            all_classes: vec![],
        };
        let text = render_result("sign.jpg", &result, 5);
        assert!(!text.contains("All predictions"));
    }

    #[test]
    fn test_render_stored_includes_status() {
        let stored = StoredResult {
            image_id: "abc".to_string(),
            result: sample(),
            status: Some("completed".to_string()),
        };
        let text = render_stored(&stored);
        assert!(text.starts_with("image abc"));
        assert!(text.contains("Status:         completed"));
    }

    #[test]
    fn test_render_empty_history() {
        assert_eq!(render_history(&History::default()), "No classifications yet.");
    }

    #[test]
    fn test_report_serialize() {
        let ok = serde_json::to_value(ClassifyReport::success("stop.png", sample())).unwrap();
        assert_eq!(ok["file"], "stop.png");
        assert_eq!(ok["result"]["classification"], "Stop");
        assert!(ok.get("error").is_none());
        assert!(ok.get("error_kind").is_none());

        let err = ClassifierError::Validation {
            file: "x.gif".to_string(),
            source: ValidationError::InvalidType,
        };
        let ng = serde_json::to_value(ClassifyReport::failure("x.gif", &err)).unwrap();
        assert_eq!(ng["error"], "x.gif: Invalid file type. Only JPG and PNG formats are allowed.");
        assert_eq!(ng["error_kind"], "file_type");
        assert!(ng.get("result").is_none());
    }

    #[test]
    fn test_report_kind_ignores_file_name() {
        // ファイル名に "format" が含まれていてもサイズエラーとして分類する
        let err = ClassifierError::Validation {
            file: "format_sample.png".to_string(),
            source: ValidationError::TooLarge,
        };
        let report = ClassifyReport::failure("format_sample.png", &err);
        assert_eq!(report.error_kind, Some("file_size"));

        let err = ClassifierError::Validation {
            file: "type_extension.png".to_string(),
            source: ValidationError::MissingFileName,
        };
        assert_eq!(ClassifyReport::failure("type_extension.png", &err).error_kind, Some("missing_filename"));
    }

    #[test]
    fn test_report_kind_from_api_message() {
        let err = ClassifierError::Api {
            status: 413,
            message: "File size exceeds the maximum allowed size of 10 MB. Please upload a smaller image."
                .to_string(),
        };
        assert_eq!(ClassifyReport::failure("signs/format.png", &err).error_kind, Some("file_size"));

        let err = ClassifierError::Network("Network error occurred.".to_string());
        assert_eq!(ClassifyReport::failure("signs/type.png", &err).error_kind, Some("unknown"));
    }
}
