//! 分類バックエンド連携（fetch）
//!
//! 1. 画像を `/api/upload/` にmultipartで送信
//! 2. 分類結果が返ればそれを使い、image_id だけなら分類APIを呼ぶ
//!
//! エラーはすべて表示用の文言（String）で返す

use base64::Engine;
use road_sign_common::api::{ClassifyRequest, UPLOAD_FIELD};
use road_sign_common::messages::{
    format_error_message, CLASSIFY_FAILED, NETWORK_ERROR, UPLOAD_FAILED, UPLOAD_NETWORK_ERROR,
};
use road_sign_common::{ApiErrorBody, ClassificationResult, Endpoints, LoadedImage, UploadOutcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// 画像を分類する（アップロード＋必要なら分類API）
pub async fn classify_image(
    endpoints: &Endpoints,
    image: &LoadedImage,
) -> Result<ClassificationResult, String> {
    match upload_image(endpoints, image).await? {
        UploadOutcome::Classified(result) => Ok(result),
        UploadOutcome::Stored { image_id } => classify_uploaded(endpoints, &image_id).await,
    }
}

/// 画像をアップロード
async fn upload_image(endpoints: &Endpoints, image: &LoadedImage) -> Result<UploadOutcome, String> {
    let form = build_form_data(image).map_err(|e| {
        gloo::console::error!("failed to build upload form:", e);
        format_error_message(UPLOAD_FAILED)
    })?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from(form));

    let request = Request::new_with_str_and_init(&endpoints.upload(), &opts)
        .map_err(|_| format_error_message(UPLOAD_FAILED))?;

    let text = send(request, UPLOAD_NETWORK_ERROR, UPLOAD_FAILED).await?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|_| format_error_message(UPLOAD_FAILED))?;

    UploadOutcome::from_value(value).map_err(|e| {
        gloo::console::error!("unexpected upload response:", e.to_string());
        format_error_message(UPLOAD_FAILED)
    })
}

/// アップロード済み画像の分類を依頼
async fn classify_uploaded(
    endpoints: &Endpoints,
    image_id: &str,
) -> Result<ClassificationResult, String> {
    let body = serde_json::to_string(&ClassifyRequest { image_id: image_id.to_string() })
        .map_err(|_| format_error_message(CLASSIFY_FAILED))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&endpoints.classify(), &opts)
        .map_err(|_| format_error_message(CLASSIFY_FAILED))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|_| format_error_message(CLASSIFY_FAILED))?;

    let text = send(request, NETWORK_ERROR, CLASSIFY_FAILED).await?;
    serde_json::from_str(&text).map_err(|_| format_error_message(CLASSIFY_FAILED))
}

/// リクエストを送り、成功時は本文テキストを返す
async fn send(request: Request, network_message: &str, fallback: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| format_error_message(network_message))?;

    // fetch自体の失敗はネットワークエラー
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| {
            gloo::console::error!("fetch failed:", e);
            format_error_message(network_message)
        })?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| format_error_message(fallback))?;

    let text = match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    if !resp.ok() {
        gloo::console::warn!("classification API error:", resp.status(), text.clone());
        return Err(ApiErrorBody::parse(&text).user_message(fallback));
    }

    Ok(text)
}

/// Data URLからmultipartフォームを組み立てる
fn build_form_data(image: &LoadedImage) -> Result<FormData, JsValue> {
    let bytes = decode_data_url(&image.data_url)
        .ok_or_else(|| JsValue::from_str("image data is not a base64 data URL"))?;

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array);

    let bag = BlobPropertyBag::new();
    bag.set_type(&image.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &image.name)?;
    Ok(form)
}

/// Data URLからBase64データ部分を抽出
///
/// "data:image/png;base64,iVBOR..." → "iVBOR..."
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    let (header, data) = data_url.split_once(',')?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return None;
    }
    Some(data)
}

/// Data URLをバイト列にデコード
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let data = extract_base64_from_data_url(data_url)?;
    base64::engine::general_purpose::STANDARD.decode(data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base64_png() {
        let data_url = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(extract_base64_from_data_url(data_url), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_extract_base64_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(extract_base64_from_data_url(data_url), Some("/9j/4AAQSkZJRg=="));
    }

    #[test]
    fn test_extract_base64_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
        // base64指定のないData URLは対象外
        assert_eq!(extract_base64_from_data_url("data:text/plain,hello"), None);
    }

    #[test]
    fn test_decode_data_url() {
        // PNGシグネチャ先頭
        let bytes = decode_data_url("data:image/png;base64,iVBORw0KGgo=").expect("デコード失敗");
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_decode_data_url_bad_base64() {
        assert_eq!(decode_data_url("data:image/png;base64,@@@"), None);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_build_form_data_has_file_field() {
        let image = LoadedImage {
            name: "stop.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 8,
            data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        };

        let form = build_form_data(&image).expect("form build failed");
        assert!(form.has(UPLOAD_FIELD));
    }
}
