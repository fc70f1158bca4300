use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use archthumb_core::{HttpImageFetcher, ThumbnailMaterializer, find_existing};
use archthumb_model::VideoId;
use archthumbctl::{
    ExtractorConfig,
    manifest::{load_legacy_records, load_tower_cards},
};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "archthumbctl",
    version,
    about = "Extract archived video thumbnails into canonical video-<id>.<ext> files"
)]
struct Cli {
    /// TOML config file (defaults to $ARCHTHUMB_CONFIG_PATH or ./archthumb.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy the locally stored thumbnails of tower cards
    Towers {
        /// JSON array of tower card records
        #[arg(long)]
        manifest: PathBuf,
        /// Output directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Download and re-encode thumbnails of legacy VOD records
    Legacy {
        /// JSON array of legacy VOD records
        #[arg(long)]
        manifest: PathBuf,
        /// Output directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Per-request timeout, e.g. 10s (overrides config)
        #[arg(long, value_parser = humantime::parse_duration)]
        timeout: Option<Duration>,
        /// JPEG quality 1-100 (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        jpeg_quality: Option<u8>,
    },
    /// Print the path of an already extracted thumbnail
    Find {
        video_id: String,
        /// Directory to search; repeat to search several in order
        #[arg(long = "dir")]
        dirs: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let (config, source) = ExtractorConfig::load(cli.config.as_deref())?;
    debug!("Loaded configuration from {:?}", source);

    match cli.command {
        Command::Towers { manifest, out } => {
            let cards = load_tower_cards(&manifest)?;
            let out = out.unwrap_or(config.output_dir);

            let report = ThumbnailMaterializer::new()
                .materialize_from_local_source(&cards, &out)
                .await
                .context("tower card extraction aborted")?;
            info!("Tower cards done: {}", report);
        }
        Command::Legacy {
            manifest,
            out,
            timeout,
            jpeg_quality,
        } => {
            let records = load_legacy_records(&manifest)?;
            let out = out.unwrap_or(config.output_dir);
            let timeout = timeout.unwrap_or(config.http_timeout);
            let fetcher = HttpImageFetcher::new(timeout, &config.user_agent)
                .context("failed to build HTTP client")?;

            let report = ThumbnailMaterializer::new()
                .with_fetcher(Arc::new(fetcher))
                .with_jpeg_quality(jpeg_quality.unwrap_or(config.jpeg_quality))
                .materialize_from_remote_source(&records, &out)
                .await
                .context("legacy record extraction aborted")?;
            info!("Legacy records done: {}", report);
        }
        Command::Find { video_id, dirs } => {
            let dirs = if dirs.is_empty() { config.lookup_dirs } else { dirs };
            let video_id = VideoId::new(video_id);
            match find_existing(&video_id, dirs.as_slice()) {
                Some(path) => println!("{}", path.display()),
                None => bail!("no thumbnail found for video {video_id}"),
            }
        }
    }

    Ok(())
}
