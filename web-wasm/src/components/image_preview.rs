//! 画像プレビューコンポーネント
//!
//! 読み込んだ画像を表示し、分類ボタンを出す

use leptos::prelude::*;
use road_sign_common::LoadedImage;
use crate::components::loading_spinner::LoadingSpinner;

#[component]
pub fn ImagePreview<FC, FR>(
    image: LoadedImage,
    loading: Signal<bool>,
    can_classify: Signal<bool>,
    on_classify: FC,
    on_reset: FR,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
{
    let size_label = format_file_size(image.size);

    view! {
        <div class="image-preview">
            <div class="preview-container">
                <h3>"Image Preview"</h3>
                <div class="preview-image-wrapper">
                    <img class="preview-image" src=image.data_url.clone() alt=image.name.clone() />
                </div>
                <p class="preview-meta">
                    <span class="preview-name">{image.name.clone()}</span>
                    " · "
                    <span class="preview-size">{size_label}</span>
                </p>

                <Show when=move || loading.get()>
                    <LoadingSpinner message="Classifying image..." />
                </Show>

                <div class="preview-actions">
                    <button
                        class="classify-button"
                        disabled=move || !can_classify.get()
                        on:click=move |_| on_classify(())
                    >
                        {move || if loading.get() { "Classifying..." } else { "Classify Image" }}
                    </button>
                    <button
                        class="reset-button"
                        disabled=move || loading.get()
                        on:click=move |_| on_reset(())
                    >
                        "Upload another"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// バイト数を "1.5 MB" のような表記にする
pub fn format_file_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MIB {
        format!("{:.1} MB", bytes_f / MIB)
    } else if bytes_f >= KIB {
        format!("{:.1} KB", bytes_f / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 / 2), "1.5 MB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10.0 MB");
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::test_dom::{find, mount_point, text};
    use leptos::mount::mount_to;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_image() -> LoadedImage {
        LoadedImage {
            name: "stop.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 2048,
            data_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn wasm_preview_while_classifying() {
        let parent = mount_point();
        let image = sample_image();
        let _handle = mount_to(parent.clone(), move || {
            view! {
                <ImagePreview
                    image=image
                    loading=Signal::derive(|| true)
                    can_classify=Signal::derive(|| false)
                    on_classify=|_: ()| {}
                    on_reset=|_: ()| {}
                />
            }
        });

        let button = find(&parent, "button.classify-button").expect("classify button missing");
        assert!(button.has_attribute("disabled"));
        assert_eq!(text(&parent, "button.classify-button"), "Classifying...");

        let reset = find(&parent, "button.reset-button").expect("reset button missing");
        assert!(reset.has_attribute("disabled"));

        assert!(find(&parent, ".loading-spinner").is_some());
        assert!(text(&parent, ".loading-spinner").contains("Classifying image..."));
    }

    #[wasm_bindgen_test]
    fn wasm_preview_ready_to_classify() {
        let parent = mount_point();
        let image = sample_image();
        let _handle = mount_to(parent.clone(), move || {
            view! {
                <ImagePreview
                    image=image
                    loading=Signal::derive(|| false)
                    can_classify=Signal::derive(|| true)
                    on_classify=|_: ()| {}
                    on_reset=|_: ()| {}
                />
            }
        });

        let button = find(&parent, "button.classify-button").expect("classify button missing");
        assert!(!button.has_attribute("disabled"));
        assert_eq!(text(&parent, "button.classify-button"), "Classify Image");
        assert!(find(&parent, ".loading-spinner").is_none());
        assert_eq!(text(&parent, ".preview-name"), "stop.png");
        assert_eq!(text(&parent, ".preview-size"), "2.0 KB");
    }
}
