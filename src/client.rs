//! 分類バックエンドのHTTPクライアント
//!
//! Web版の fetch 実装と同じ手順:
//! 1. `/api/upload/` に multipart で画像を送信
//! 2. 分類結果が含まれていればそれを採用、image_id のみなら分類APIを呼ぶ

use crate::error::{ClassifierError, Result};
use crate::scanner::ImageFile;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use road_sign_common::api::{ClassifyRequest, UPLOAD_FIELD};
use road_sign_common::messages::{
    CLASSIFY_FAILED, HISTORY_FAILED, NETWORK_ERROR, RESULT_FAILED, UPLOAD_FAILED,
    UPLOAD_NETWORK_ERROR,
};
use road_sign_common::{
    ApiErrorBody, ClassificationResult, Endpoints, History, StoredResult, UploadOutcome,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct ClassifierClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    verbose: bool,
}

impl ClassifierClient {
    pub fn new(base_url: &str, timeout_seconds: u64, verbose: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(base_url),
            verbose,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// 画像を分類する（アップロード＋必要なら分類API）
    pub async fn classify(&self, image: &ImageFile) -> Result<ClassificationResult> {
        match self.upload(image).await? {
            UploadOutcome::Classified(result) => Ok(result),
            UploadOutcome::Stored { image_id } => {
                if self.verbose {
                    println!("  uploaded {} as image_id={}", image.file_name, image_id);
                }
                self.classify_uploaded(&image_id).await
            }
        }
    }

    /// 画像をアップロード
    pub async fn upload(&self, image: &ImageFile) -> Result<UploadOutcome> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.endpoints.upload();
        if self.verbose {
            println!("  POST {} ({} bytes, {})", url, image.size(), image.mime_type);
        }

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.network_error(e, UPLOAD_NETWORK_ERROR))?;

        let value: serde_json::Value = self.read_json(response, UPLOAD_FAILED).await?;
        Ok(UploadOutcome::from_value(value)?)
    }

    /// アップロード済み画像の分類を依頼
    pub async fn classify_uploaded(&self, image_id: &str) -> Result<ClassificationResult> {
        let url = self.endpoints.classify();
        if self.verbose {
            println!("  POST {}", url);
        }

        let response = self
            .http
            .post(&url)
            .json(&ClassifyRequest { image_id: image_id.to_string() })
            .send()
            .await
            .map_err(|e| self.network_error(e, NETWORK_ERROR))?;

        self.read_json(response, CLASSIFY_FAILED).await
    }

    /// 保存済みの分類結果を取得
    pub async fn get_result(&self, image_id: &str) -> Result<StoredResult> {
        let response = self
            .http
            .get(self.endpoints.result(image_id))
            .send()
            .await
            .map_err(|e| self.network_error(e, NETWORK_ERROR))?;

        self.read_json(response, RESULT_FAILED).await
    }

    /// 分類履歴を取得
    pub async fn history(&self) -> Result<History> {
        let response = self
            .http
            .get(self.endpoints.history())
            .send()
            .await
            .map_err(|e| self.network_error(e, NETWORK_ERROR))?;

        self.read_json(response, HISTORY_FAILED).await
    }

    /// 成功レスポンスはJSONとして読み、失敗はエラー本文から表示用メッセージを作る
    async fn read_json<T: DeserializeOwned>(&self, response: Response, fallback: &str) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.network_error(e, NETWORK_ERROR))?;

        if !status.is_success() {
            if self.verbose {
                println!("  HTTP {}: {}", status.as_u16(), text);
            }
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message: ApiErrorBody::parse(&text).user_message(fallback),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            if self.verbose {
                println!("  invalid response body: {}", text);
            }
            ClassifierError::UnexpectedResponse(e.to_string())
        })
    }

    fn network_error(&self, err: reqwest::Error, message: &str) -> ClassifierError {
        if self.verbose {
            println!("  network error: {}", err);
        }
        ClassifierError::Network(message.to_string())
    }
}
