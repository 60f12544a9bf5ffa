//! 画面状態の遷移
//!
//! READY → IMAGE LOADED → CLASSIFIED / ERROR の4状態と、
//! 送信中フラグ（同時に1リクエストまで）を管理する。
//! 表示側はこの状態からどのパネルを出すかを決めるだけ。

use crate::types::ClassificationResult;

/// 読み込み済み画像
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    /// プレビュー兼送信元のData URL
    pub data_url: String,
}

/// 画面状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    ImageLoaded,
    Classified,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::ImageLoaded => "image-loaded",
            Phase::Classified => "classified",
            Phase::Error => "error",
        }
    }
}

/// 状態遷移イベント
#[derive(Debug, Clone)]
pub enum Event {
    ImageSelected(LoadedImage),
    /// 送信前の検証で弾いた
    Rejected(String),
    ClassifyStarted,
    ClassifySucceeded(ClassificationResult),
    ClassifyFailed(String),
    Reset,
}

/// セッション状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub image: Option<LoadedImage>,
    pub result: Option<ClassificationResult>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// イベントを適用する
    ///
    /// 無視されたイベント（送信中の二重送信・画像差し替え・リセット、画像なしでの送信）は false を返す
    pub fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::ImageSelected(image) => {
                if self.loading {
                    return false;
                }
                self.image = Some(image);
                self.error = None;
                self.result = None;
            }
            Event::Rejected(message) | Event::ClassifyFailed(message) => {
                self.error = Some(message);
                self.result = None;
                self.loading = false;
            }
            Event::ClassifyStarted => {
                if self.loading || self.image.is_none() {
                    return false;
                }
                self.loading = true;
            }
            Event::ClassifySucceeded(result) => {
                self.result = Some(result);
                self.error = None;
                self.loading = false;
            }
            Event::Reset => {
                if self.loading {
                    return false;
                }
                *self = Self::default();
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        if self.error.is_some() {
            Phase::Error
        } else if self.result.is_some() {
            Phase::Classified
        } else if self.image.is_some() {
            Phase::ImageLoaded
        } else {
            Phase::Ready
        }
    }

    pub fn can_classify(&self) -> bool {
        self.image.is_some() && !self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image(name: &str) -> LoadedImage {
        LoadedImage {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            size: 2048,
            data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        }
    }

    fn sample_result() -> ClassificationResult {
        ClassificationResult {
            classification: "Stop".to_string(),
            confidence: 0.97,
            all_classes: vec![],
        }
    }

    #[test]
    fn test_initial_state_is_ready() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Ready);
        assert!(!session.can_classify());
    }

    #[test]
    fn test_full_flow() {
        let mut session = Session::new();

        assert!(session.apply(Event::ImageSelected(sample_image("stop.png"))));
        assert_eq!(session.phase(), Phase::ImageLoaded);

        assert!(session.apply(Event::ClassifyStarted));
        assert!(session.loading);
        assert_eq!(session.phase(), Phase::ImageLoaded);

        assert!(session.apply(Event::ClassifySucceeded(sample_result())));
        assert_eq!(session.phase(), Phase::Classified);
        assert!(!session.loading);
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));

        assert!(session.apply(Event::ClassifyStarted));
        assert!(!session.apply(Event::ClassifyStarted));
        assert!(!session.can_classify());
    }

    #[test]
    fn test_classify_without_image_is_ignored() {
        let mut session = Session::new();
        assert!(!session.apply(Event::ClassifyStarted));
        assert!(!session.loading);
    }

    #[test]
    fn test_new_image_ignored_while_loading() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));
        session.apply(Event::ClassifyStarted);

        assert!(!session.apply(Event::ImageSelected(sample_image("yield.png"))));
        assert_eq!(session.image.as_ref().map(|i| i.name.as_str()), Some("stop.png"));
    }

    #[test]
    fn test_failure_keeps_image_and_clears_result() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));
        session.apply(Event::ClassifyStarted);
        session.apply(Event::ClassifySucceeded(sample_result()));

        session.apply(Event::ClassifyStarted);
        session.apply(Event::ClassifyFailed("Service unavailable".to_string()));

        assert_eq!(session.phase(), Phase::Error);
        assert!(session.image.is_some());
        assert!(session.result.is_none());
        assert!(!session.loading);
        // エラー後も再送信できる
        assert!(session.can_classify());
    }

    #[test]
    fn test_new_image_clears_error() {
        let mut session = Session::new();
        session.apply(Event::Rejected("File too large. Please upload an image under 10MB.".to_string()));
        assert_eq!(session.phase(), Phase::Error);

        session.apply(Event::ImageSelected(sample_image("stop.png")));
        assert_eq!(session.phase(), Phase::ImageLoaded);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_success_clears_error() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));
        session.apply(Event::ClassifyFailed("timeout".to_string()));
        session.apply(Event::ClassifyStarted);
        session.apply(Event::ClassifySucceeded(sample_result()));

        assert_eq!(session.phase(), Phase::Classified);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));
        session.apply(Event::Reset);
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_reset_ignored_while_loading() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));
        session.apply(Event::ClassifyStarted);

        assert!(!session.apply(Event::Reset));
        assert!(session.loading);
        assert!(session.image.is_some());

        session.apply(Event::ClassifySucceeded(sample_result()));
        assert!(session.apply(Event::Reset));
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn test_rejected_after_success_clears_result() {
        let mut session = Session::new();
        session.apply(Event::ImageSelected(sample_image("stop.png")));
        session.apply(Event::ClassifyStarted);
        session.apply(Event::ClassifySucceeded(sample_result()));
        assert_eq!(session.phase(), Phase::Classified);

        session.apply(Event::Rejected("Invalid file type. Only JPG and PNG formats are allowed.".to_string()));
        assert!(session.result.is_none());
        assert_eq!(session.phase(), Phase::Error);
        // 以前の画像は残り、再送信できる
        assert_eq!(session.image.as_ref().map(|i| i.name.as_str()), Some("stop.png"));
        assert!(session.can_classify());
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::ImageLoaded.as_str(), "image-loaded");
        assert_eq!(Phase::Error.as_str(), "error");
    }
}
