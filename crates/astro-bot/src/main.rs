//! Astroboli daily post bot binary.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use astro_bot::{run, BotConfig, RunOptions};

/// Generate and publish the Astroboli daily post.
#[derive(Debug, Parser)]
#[command(name = "astro-bot", version, about)]
struct Cli {
    /// Build every artifact but skip Instagram delivery
    #[arg(long)]
    dry_run: bool,

    /// Use a canned brief instead of calling the language model
    #[arg(long)]
    mock: bool,

    /// Skip video generation and reel composition
    #[arg(long)]
    no_reel: bool,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("astro_bot=info".parse().unwrap())
        .add_directive("astro_content=info".parse().unwrap())
        .add_directive("astro_media=info".parse().unwrap())
        .add_directive("astro_providers=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();
    info!("Starting astro-bot");

    let config = BotConfig::from_env();
    let options = RunOptions {
        dry_run: cli.dry_run,
        mock: cli.mock,
        no_reel: cli.no_reel,
    };

    match run(&config, options).await {
        Ok(report) => {
            let reel = report
                .reel_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string());
            info!(
                "Run complete: image {}, reel {}, posted: {}",
                report.image_path.display(),
                reel,
                report.posted
            );
        }
        Err(e) => {
            error!("Run failed: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
