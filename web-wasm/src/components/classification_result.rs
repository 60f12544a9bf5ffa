//! 分類結果コンポーネント
//!
//! 予測ラベル・確信度・全候補を表示

use leptos::prelude::*;
use road_sign_common::types::confidence_percent;
use road_sign_common::ClassificationResult;

#[component]
pub fn ClassificationResultCard(result: ClassificationResult) -> impl IntoView {
    let percent = result.confidence_percent();
    let bar_width = format!("width: {}", percent);
    let ranked = result.ranked_classes();
    let has_candidates = !ranked.is_empty();

    view! {
        <div class="classification-result">
            <div class="result-container">
                <h3>"Classification Result"</h3>
                <p class="result-label">
                    "Predicted sign: "
                    <strong class="result-sign">{result.classification.clone()}</strong>
                </p>
                <div class="confidence">
                    <span class="confidence-label">"Confidence: "{percent.clone()}</span>
                    <div class="confidence-bar">
                        <div class="confidence-fill" style=bar_width />
                    </div>
                </div>

                {has_candidates.then(|| view! {
                    <div class="all-classes">
                        <h4>"All predictions"</h4>
                        <ul>
                            {ranked
                                .into_iter()
                                .map(|class| view! {
                                    <li class="class-row">
                                        <span class="class-sign">{class.sign}</span>
                                        <span class="class-confidence">{confidence_percent(class.confidence)}</span>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    </div>
                })}
            </div>
        </div>
    }
}
