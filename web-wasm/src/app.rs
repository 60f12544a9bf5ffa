//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use road_sign_common::messages::NO_IMAGE;
use road_sign_common::{Event, LoadedImage, Session};
use crate::api;
use crate::components::{
    classification_result::ClassificationResultCard,
    error_display::ErrorDisplay,
    header::Header,
    image_preview::ImagePreview,
    upload_area::UploadArea,
};
use crate::config;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let session = RwSignal::new(Session::new());
    let endpoints = StoredValue::new(config::endpoints());

    let loading = Signal::derive(move || session.with(|s| s.loading));
    let can_classify = Signal::derive(move || session.with(|s| s.can_classify()));
    let phase_class = move || format!("App phase-{}", session.with(|s| s.phase().as_str()));
    let image = Memo::new(move |_| session.with(|s| s.image.clone()));
    let result = Memo::new(move |_| session.with(|s| s.result.clone()));
    let error = Memo::new(move |_| session.with(|s| s.error.clone()));

    // 画像読み込みハンドラ
    let on_image_loaded = move |image: LoadedImage| {
        session.update(|s| {
            s.apply(Event::ImageSelected(image));
        });
    };

    // 検証エラーハンドラ
    let on_rejected = move |message: String| {
        session.update(|s| {
            s.apply(Event::Rejected(message));
        });
    };

    // 分類開始ハンドラ
    let on_classify = move |_: ()| {
        let Some(image) = session.with_untracked(|s| s.image.clone()) else {
            session.update(|s| {
                s.apply(Event::ClassifyFailed(NO_IMAGE.to_string()));
            });
            return;
        };

        // 送信中なら無視（同時に1リクエストまで）
        let started = session
            .try_update(|s| s.apply(Event::ClassifyStarted))
            .unwrap_or(false);
        if !started {
            return;
        }

        spawn_local(async move {
            let endpoints = endpoints.get_value();
            let event = match api::classify_image(&endpoints, &image).await {
                Ok(result) => Event::ClassifySucceeded(result),
                Err(message) => {
                    gloo::console::error!("classification failed:", message.clone());
                    Event::ClassifyFailed(message)
                }
            };
            session.update(|s| {
                s.apply(event);
            });
        });
    };

    // 別の画像を選び直す
    let on_reset = move |_: ()| {
        session.update(|s| {
            s.apply(Event::Reset);
        });
    };

    view! {
        <div class=phase_class>
            <Header />

            <main class="App-main">
                <UploadArea
                    loading=loading
                    on_image_loaded=on_image_loaded
                    on_rejected=on_rejected
                />

                {move || error.get().map(|error| view! { <ErrorDisplay error=error /> })}

                {move || image.get().map(|image| view! {
                    <ImagePreview
                        image=image
                        loading=loading
                        can_classify=can_classify
                        on_classify=on_classify
                        on_reset=on_reset
                    />
                })}

                {move || result.get().map(|result| view! {
                    <ClassificationResultCard result=result />
                })}
            </main>
        </div>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::test_dom::{find, mount_point};
    use leptos::mount::mount_to;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_app_starts_in_ready_phase() {
        let parent = mount_point();
        let _handle = mount_to(parent.clone(), App);

        let root = find(&parent, "div.App").expect("app root missing");
        assert_eq!(root.get_attribute("class").as_deref(), Some("App phase-ready"));
        // 画像がないのでプレビューも分類ボタンも出ない
        assert!(find(&parent, "button.classify-button").is_none());
        assert!(find(&parent, ".upload-area").is_some());
    }
}
