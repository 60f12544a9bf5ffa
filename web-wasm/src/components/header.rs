//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="App-header">
            <h1>"Road Sign Classification"</h1>
            <p>"Upload a road sign image to classify it"</p>
        </header>
    }
}
