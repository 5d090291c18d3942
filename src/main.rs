use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use listing_scribe::config::AppConfig;
use listing_scribe::export::ExportFormat;
use listing_scribe::gateways::{JsonFileStore, OpenAiGateway, PersistenceGateway};
use listing_scribe::{Channel, PropertyAttributes, Session};

#[derive(Parser)]
#[command(name = "listing-scribe", version, about = "Generate and export property descriptions")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generation request without calling the service
    Prompt {
        /// JSON file with the property attributes
        #[arg(long)]
        attributes: PathBuf,
        /// website, instagram, tiktok or all (overrides targetPlatform)
        #[arg(long)]
        channel: Option<Channel>,
    },
    /// Generate a description and optionally export or save it
    Generate {
        #[arg(long)]
        attributes: PathBuf,
        #[arg(long)]
        channel: Option<Channel>,
        /// pdf, word or html; may be repeated
        #[arg(long = "export")]
        exports: Vec<ExportFormat>,
        /// Directory for exported files
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Save under this title, or the synthesized one when empty
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        save: Option<String>,
    },
    /// List the most recently saved descriptions
    Saved,
}

/// Attribute file as the form produces it, target platform included
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormInput {
    #[serde(flatten)]
    attributes: PropertyAttributes,
    #[serde(default)]
    target_platform: Option<String>,
}

async fn read_form(path: &Path, channel: Option<Channel>) -> Result<(PropertyAttributes, Option<Channel>)> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read attributes from {}", path.display()))?;
    let form: FormInput = serde_json::from_str(&json)
        .with_context(|| format!("Invalid attributes JSON in {}", path.display()))?;

    let channel = match (channel, form.target_platform.as_deref().map(str::trim)) {
        (Some(channel), _) => Some(channel),
        (None, None) | (None, Some("")) => None,
        (None, Some(platform)) => Some(platform.parse().map_err(anyhow::Error::msg)?),
    };
    Ok((form.attributes, channel))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let store = Arc::new(JsonFileStore::with_limit(
        &config.storage.dir,
        config.storage.list_limit,
    ));

    match cli.command {
        Command::Prompt { attributes, channel } => {
            let (attributes, channel) = read_form(&attributes, channel).await?;
            let request = Session::preview_request(&attributes, channel);
            println!("{}", request.text());
        }
        Command::Generate {
            attributes,
            channel,
            exports,
            out,
            save,
        } => {
            let (attributes, channel) = read_form(&attributes, channel).await?;
            let generator = Arc::new(OpenAiGateway::from_env(&config.generation)?);
            let mut session = Session::new(generator, store);

            info!("🏠 Generating property description");
            let version = session.generate(attributes, channel).await?;
            println!("{}\n", version.content());

            if let Some(report) = session.keywords() {
                println!("{}\n", report);
            }
            if let Some(link) = session.share_link(&config.share.origin) {
                println!("Share: {}", link);
            }

            if !exports.is_empty() {
                tokio::fs::create_dir_all(&out).await?;
            }
            for format in exports {
                let Some(file) = session.export(format) else {
                    continue;
                };
                let path = out.join(file.filename);
                tokio::fs::write(&path, &file.bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("💾 Exported {} to {}", format, path.display());
            }

            if let Some(title) = save {
                let title = if title.trim().is_empty() {
                    session.title()
                } else {
                    title
                };
                let saved = session.save_current(&title).await?;
                println!("Saved as '{}' ({})", saved.title, saved.id);
            }
        }
        Command::Saved => {
            let saved = store.list().await?;
            info!("Found {} saved descriptions", saved.len());

            for (i, description) in saved.iter().enumerate() {
                println!(
                    "{}. {} (updated {})",
                    i + 1,
                    description.title,
                    description.updated_at.format("%Y-%m-%d %H:%M")
                );
                let preview: String = description.content.chars().take(120).collect();
                println!("   {}", preview.replace('\n', " "));
                println!();
            }
        }
    }

    Ok(())
}
