//! Road Sign Classifier CLI
//!
//! Web版と同じバックエンドに画像を送り、分類結果を表示する

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
