//! エラー表示コンポーネント
//!
//! 検証エラーとAPIエラーの両方をここに出す

use leptos::prelude::*;
use road_sign_common::error_kind;

#[component]
pub fn ErrorDisplay(error: String) -> impl IntoView {
    let class = format!("error-display error-{}", error_kind(&error).as_str());

    view! {
        <div class=class role="alert" aria-live="polite">
            <div class="error-container">
                <div class="error-icon-wrapper">
                    <span class="error-icon" aria-hidden="true">"⚠️"</span>
                </div>
                <div class="error-content">
                    <h4 class="error-title">"Upload Error"</h4>
                    <p class="error-message">{error}</p>
                </div>
            </div>
        </div>
    }
}
