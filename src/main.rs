use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use road_sign_classifier::{cli, client, config, error, output, scanner};
use cli::{Cli, Commands};
use client::ClassifierClient;
use config::{ApiUrlSource, Config};
use error::{ClassifierError, Result};
use output::ClassifyReport;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    let (api_url, _) = config.resolve_api_url(cli.api_url.as_deref());

    match cli.command {
        Commands::Classify { paths, recursive, json, top } => {
            let client = ClassifierClient::new(&api_url, config.timeout_seconds, cli.verbose)?;
            classify(&client, &paths, recursive, json, top).await?;
        }

        Commands::Result { image_id, json } => {
            let client = ClassifierClient::new(&api_url, config.timeout_seconds, cli.verbose)?;
            let stored = client.get_result(&image_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stored)?);
            } else {
                println!("{}", output::render_stored(&stored));
            }
        }

        Commands::History { json } => {
            let client = ClassifierClient::new(&api_url, config.timeout_seconds, cli.verbose)?;
            let history = client.history().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                println!("{}", output::render_history(&history));
            }
        }

        Commands::Config { set_api_url, set_timeout, show } => {
            let changed = set_api_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
            }
            if changed {
                config.save()?;
                println!("✔ Saved {}", Config::config_path()?.display());
            }

            if show || !changed {
                // 保存した値を反映して解決し直す
                let (api_url, api_url_source) = config.resolve_api_url(cli.api_url.as_deref());
                println!("Settings:");
                println!("  API URL: {} ({})", api_url, api_url_source.label());
                if api_url_source != ApiUrlSource::File {
                    if let Some(stored) = &config.api_url {
                        println!("  Stored API URL: {}", stored);
                    }
                }
                println!("  Timeout: {}s", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

/// 画像を1枚ずつ送信する（同時送信は1件まで）
async fn classify(
    client: &ClassifierClient,
    paths: &[PathBuf],
    recursive: bool,
    json: bool,
    top: usize,
) -> Result<()> {
    let images = scanner::collect_images(paths, recursive)?;
    let total = images.len();

    if !json {
        println!("🚦 road-sign - {} image(s) → {}\n", total, client.endpoints().base_url());
    }

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner
    };

    let mut reports = Vec::with_capacity(total);
    let mut failed = 0;

    for (idx, path) in images.iter().enumerate() {
        let file_label = path.display().to_string();

        let outcome = match scanner::load_image(path) {
            Ok(image) => {
                spinner.set_message(format!("[{}/{}] Classifying {}...", idx + 1, total, image.file_name));
                spinner.enable_steady_tick(Duration::from_millis(100));
                let result = client.classify(&image).await;
                spinner.disable_steady_tick();
                spinner.set_message("");
                result
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                if !json {
                    spinner.println(output::render_result(&file_label, &result, top));
                }
                reports.push(ClassifyReport::success(&file_label, result));
            }
            Err(e) => {
                failed += 1;
                if !json {
                    spinner.println(format!("{}\n  ✖ {}", file_label, e));
                }
                reports.push(ClassifyReport::failure(&file_label, &e));
            }
        }
    }
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failed > 0 {
        return Err(ClassifierError::PartialFailure { failed, total });
    }

    if !json {
        println!("\n✅ Done");
    }
    Ok(())
}
