//! ローディング表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(
    #[prop(into, default = "Loading...".to_string())] message: String,
) -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status" aria-live="polite">
            <div class="spinner" aria-hidden="true" />
            <p>{message}</p>
        </div>
    }
}
