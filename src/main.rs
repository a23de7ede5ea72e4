use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use snapsmith::config::{GeneratorConfig, UnsplashConfig};
use snapsmith::generate::{
    GenerateOptions, GenerationClient, Orientation, Preset, Style,
};
use snapsmith::unsplash::{PhotoSize, SearchOrientation, UnsplashClient};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "snapsmith")]
#[command(about = "Generate lifestyle images and fetch stock photos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TriptychKind {
    /// Same model and outfit across three street scenes.
    Outfit,
    /// Same cup of coffee from three angles.
    Coffee,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a single image from a prompt.
    Generate {
        prompt: String,
        #[arg(long, default_value = "generated-images")]
        dir: PathBuf,
        /// Output filename without extension.
        #[arg(long)]
        filename: Option<String>,
        #[arg(long, value_enum, default_value = "lifestyle")]
        style: Style,
        #[arg(long, value_enum, default_value = "portrait")]
        orientation: Orientation,
        /// Maximum request attempts before giving up.
        #[arg(long, default_value_t = 3)]
        attempts: u32,
        /// Wrap the prompt in a preset template (outfit, food, travel, home).
        #[arg(long, value_enum)]
        preset: Option<Preset>,
    },
    /// Generate one image per prompt, sequentially.
    Batch {
        #[arg(required = true)]
        prompts: Vec<String>,
        #[arg(long, default_value = "generated-images")]
        dir: PathBuf,
        /// Filename prefix; images become <prefix>_1, <prefix>_2, ...
        #[arg(long)]
        filename: Option<String>,
    },
    /// Generate a three-image consistent series.
    Series {
        #[arg(value_enum)]
        kind: TriptychKind,
        description: String,
        #[arg(long, default_value = "generated-images")]
        dir: PathBuf,
    },
    /// Search Unsplash and download the results.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long, default_value = "images")]
        dir: PathBuf,
        #[arg(long, value_enum)]
        orientation: Option<SearchOrientation>,
        #[arg(long, value_enum, default_value = "regular")]
        size: PhotoSize,
    },
    /// Download a random Unsplash photo.
    Random {
        query: Option<String>,
        #[arg(long, default_value = "images")]
        dir: PathBuf,
        #[arg(long, value_enum)]
        orientation: Option<SearchOrientation>,
        #[arg(long, value_enum, default_value = "regular")]
        size: PhotoSize,
    },
}

async fn run(command: Command) -> snapsmith::Result<()> {
    match command {
        Command::Generate {
            prompt,
            dir,
            filename,
            style,
            orientation,
            attempts,
            preset,
        } => {
            let client = GenerationClient::new(GeneratorConfig::from_env()?);

            let image = if let Some(preset) = preset {
                client.generate_preset(preset, &prompt, dir).await?
            } else {
                let mut options = GenerateOptions::new(prompt);
                options.output_dir = dir;
                options.filename = filename;
                options.style = style;
                options.orientation = orientation;
                options.max_attempts = attempts;
                client.generate(&options).await?
            };

            info!(
                "Generated {} ({:.1} KB)",
                image.file_path.display(),
                image.size as f64 / 1024.0
            );
        }
        Command::Batch {
            prompts,
            dir,
            filename,
        } => {
            let client = GenerationClient::new(GeneratorConfig::from_env()?);

            let mut base = GenerateOptions::new(String::new());
            base.output_dir = dir;
            base.filename = filename;

            let total = prompts.len();
            let results = client.generate_batch(&prompts, &base).await;
            info!("{} of {} images succeeded", results.len(), total);
            for image in &results {
                info!("  {}", image.file_path.display());
            }
        }
        Command::Series {
            kind,
            description,
            dir,
        } => {
            let client = GenerationClient::new(GeneratorConfig::from_env()?);

            let results = match kind {
                TriptychKind::Outfit => client.outfit_triptych(&description, dir).await,
                TriptychKind::Coffee => client.coffee_triptych(&description, dir).await,
            };

            info!("{} of 3 series images succeeded", results.len());
            for image in &results {
                info!("  {}", image.file_path.display());
            }
        }
        Command::Search {
            query,
            count,
            dir,
            orientation,
            size,
        } => {
            let client = UnsplashClient::new(UnsplashConfig::from_env()?);

            let files = client
                .search_and_download(&query, &dir, count, orientation, size)
                .await?;
            info!("{} of {} photos downloaded", files.len(), count);
            for file in &files {
                info!("  {}", file.local_path.display());
            }
        }
        Command::Random {
            query,
            dir,
            orientation,
            size,
        } => {
            let client = UnsplashClient::new(UnsplashConfig::from_env()?);

            let file = client
                .download_random_photo(&dir, query.as_deref(), orientation, size)
                .await?;
            info!("Downloaded {}", file.local_path.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapsmith=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
