//! ブラウザテスト用のDOMヘルパー

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// body直下にマウント先のdivを作る
pub fn mount_point() -> HtmlElement {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document not available");
    let div = document.create_element("div").expect("create div failed");
    document
        .body()
        .expect("body not available")
        .append_child(&div)
        .expect("append failed");
    div.unchecked_into()
}

pub fn find(parent: &HtmlElement, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

pub fn text(parent: &HtmlElement, selector: &str) -> String {
    find(parent, selector)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}
