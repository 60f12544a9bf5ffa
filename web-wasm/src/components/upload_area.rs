//! アップロードエリアコンポーネント
//!
//! クリックでファイル選択、またはドラッグ&ドロップで1枚受け付ける。
//! 形式・サイズを検証してからData URLとして読み込む。

use leptos::html;
use leptos::prelude::*;
use road_sign_common::messages::READ_FAILED;
use road_sign_common::{
    mime_for_extension, validate_file_name, validate_upload, LoadedImage, ACCEPT_ATTRIBUTE,
};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader};

#[component]
pub fn UploadArea<FL, FR>(
    loading: Signal<bool>,
    on_image_loaded: FL,
    on_rejected: FR,
) -> impl IntoView
where
    FL: Fn(LoadedImage) + 'static + Clone,
    FR: Fn(String) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let handle_file = move |file: File| {
        match accept_file(&file) {
            Ok(mime_type) => read_file(file, mime_type, on_image_loaded.clone(), on_rejected.clone()),
            Err(message) => on_rejected(message),
        }
    };

    let on_change = {
        let handle_file = handle_file.clone();
        move |ev: web_sys::Event| {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                handle_file(file);
            }
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if loading.get_untracked() {
            return;
        }

        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            handle_file(file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !loading.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if loading.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="image-upload">
            <input
                type="file"
                node_ref=input_ref
                accept=ACCEPT_ATTRIBUTE
                style="display: none"
                disabled=move || loading.get()
                on:change=on_change
            />

            <div
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if loading.get() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <div class="upload-icon">"📤"</div>
                <p class="upload-text">
                    {move || if loading.get() { "Processing..." } else { "Click to upload or drag and drop" }}
                </p>
                <p class="upload-hint">"PNG, JPG up to 10MB"</p>
            </div>
        </div>
    }
}

/// 検証を通ったファイルのMIMEタイプを返す
///
/// ブラウザが `type` を空で渡すことがあるので拡張子で補う
fn accept_file(file: &File) -> Result<String, String> {
    let name = file.name();
    let mime_type = match file.type_() {
        t if !t.is_empty() => t,
        _ => {
            validate_file_name(&name).map_err(|e| e.to_string())?;
            name.rsplit_once('.')
                .and_then(|(_, ext)| mime_for_extension(ext))
                .unwrap_or_default()
                .to_string()
        }
    };

    validate_upload(&mime_type, file.size() as u64).map_err(|e| e.to_string())?;
    Ok(mime_type)
}

fn read_file<FL, FR>(file: File, mime_type: String, on_image_loaded: FL, on_rejected: FR)
where
    FL: Fn(LoadedImage) + 'static,
    FR: Fn(String) + 'static + Clone,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(_) => {
            on_rejected(READ_FAILED.to_string());
            return;
        }
    };

    let name = file.name();
    let size = file.size() as u64;
    let reader_clone = reader.clone();
    let rejected = on_rejected.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|r| r.as_string());
        match loaded_image(&name, &mime_type, size, data_url) {
            Ok(image) => on_image_loaded(image),
            Err(message) => rejected(message),
        }
    }) as Box<dyn FnMut(_)>);

    let rejected = on_rejected.clone();
    let file_name = file.name();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        gloo::console::error!("FileReader error for", file_name.clone());
        rejected(READ_FAILED.to_string());
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if reader.read_as_data_url(&file).is_err() {
        gloo::console::error!("FileReader.readAsDataURL failed for", file.name());
        on_rejected(READ_FAILED.to_string());
    }
}

/// 読み込み結果を画像に変換（文字列で取れなければ読み込み失敗）
fn loaded_image(
    name: &str,
    mime_type: &str,
    size: u64,
    data_url: Option<String>,
) -> Result<LoadedImage, String> {
    match data_url {
        Some(data_url) if !data_url.is_empty() => Ok(LoadedImage {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
            data_url,
        }),
        _ => Err(READ_FAILED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_image() {
        let image = loaded_image("stop.png", "image/png", 4, Some("data:image/png;base64,AAAA".to_string()))
            .expect("読み込み失敗");
        assert_eq!(image.name, "stop.png");
        assert_eq!(image.size, 4);
        assert_eq!(image.data_url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_loaded_image_without_result_is_rejected() {
        assert_eq!(loaded_image("stop.png", "image/png", 4, None), Err(READ_FAILED.to_string()));
        assert_eq!(
            loaded_image("stop.png", "image/png", 4, Some(String::new())),
            Err(READ_FAILED.to_string())
        );
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::test_dom::{find, mount_point, text};
    use leptos::mount::mount_to;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_upload_area_disabled_while_loading() {
        let parent = mount_point();
        let _handle = mount_to(parent.clone(), || {
            view! {
                <UploadArea
                    loading=Signal::derive(|| true)
                    on_image_loaded=|_: LoadedImage| {}
                    on_rejected=|_: String| {}
                />
            }
        });

        let input = find(&parent, "input[type=file]").expect("file input missing");
        assert!(input.has_attribute("disabled"));
        assert_eq!(input.get_attribute("accept").as_deref(), Some(ACCEPT_ATTRIBUTE));

        let area = find(&parent, ".upload-area").expect("upload area missing");
        let class = area.get_attribute("class").unwrap_or_default();
        assert!(class.split_whitespace().any(|c| c == "disabled"));
        assert_eq!(text(&parent, ".upload-text"), "Processing...");
    }

    #[wasm_bindgen_test]
    fn wasm_upload_area_idle() {
        let parent = mount_point();
        let _handle = mount_to(parent.clone(), || {
            view! {
                <UploadArea
                    loading=Signal::derive(|| false)
                    on_image_loaded=|_: LoadedImage| {}
                    on_rejected=|_: String| {}
                />
            }
        });

        let input = find(&parent, "input[type=file]").expect("file input missing");
        assert!(!input.has_attribute("disabled"));
        let class = find(&parent, ".upload-area")
            .and_then(|area| area.get_attribute("class"))
            .unwrap_or_default();
        assert_eq!(class, "upload-area");
        assert_eq!(text(&parent, ".upload-text"), "Click to upload or drag and drop");
    }
}
