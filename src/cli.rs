use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "road-sign")]
#[command(about = "Classify road sign images with a remote classification service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 分類サービスのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して分類結果を表示
    Classify {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 表示する候補数
        #[arg(short = 'n', long, default_value = "5")]
        top: usize,
    },

    /// 保存済みの分類結果を取得
    Result {
        /// アップロード時のimage_id
        image_id: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 分類履歴を表示
    History {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 分類サービスのURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::parse_from(["road-sign", "classify", "a.png", "signs/", "-r", "--top", "3"]);
        match cli.command {
            Commands::Classify { paths, recursive, json, top } => {
                assert_eq!(paths, vec![PathBuf::from("a.png"), PathBuf::from("signs/")]);
                assert!(recursive);
                assert!(!json);
                assert_eq!(top, 3);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_global_api_url() {
        let cli = Cli::parse_from(["road-sign", "history", "--api-url", "http://127.0.0.1:9000"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[test]
    fn test_classify_requires_path() {
        assert!(Cli::try_parse_from(["road-sign", "classify"]).is_err());
    }
}
