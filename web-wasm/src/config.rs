//! 接続先設定
//!
//! ビルド時の環境変数 `ROAD_SIGN_API_URL` で上書きできる

use road_sign_common::{Endpoints, DEFAULT_API_BASE_URL};

pub fn api_base_url() -> &'static str {
    option_env!("ROAD_SIGN_API_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

pub fn endpoints() -> Endpoints {
    Endpoints::new(api_base_url())
}
