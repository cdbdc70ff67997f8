/// # drop-sync CLI Interface (Module)
///
/// This module implements the full CLI interface for drop-sync: command
/// parsing, subcommand routing, user-facing messages and exit behaviour.
///
/// All core business logic (channel index codec, touch, scan, upload
/// pipeline) lives in the [`drop-sync-core`] crate. This module is strictly
/// CLI glue and orchestration.
///
/// ## Commands
/// - `check`: validate the configured storage credentials (offline)
/// - `sync`: fetch `index.json`, touch the release channels, print the
///   updated document and publish it back
/// - `list`: list local drops eligible for upload
/// - `upload`: upload local drops to a blob container (default `$root`)
///
/// ## Exit codes
/// `0` success, `1` operational failure (store unreachable, object missing,
/// credential invalid, channel not found), `2` no command / help shown
/// (clap's own usage-error behaviour).
///
/// ## How To Use
/// - For command-line users: the installed `drop-sync` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed
///   [`Cli`].
///
/// Every error is recovered here, converted to a user-facing message and an
/// `Err` return; nothing crosses the command boundary as an unhandled fault.
use anyhow::Result;
use clap::{Parser, Subcommand};

use drop_sync_core::channel;
use drop_sync_core::index::{self, IndexError, INDEX_BLOB, RELEASE_CHANNELS, ROOT_CONTAINER};
use drop_sync_core::scan::{self, DROP_PREFIXES};
use drop_sync_core::upload::{self, UploadError};

use crate::load_config::{self, Settings};
use crate::store::BlobClient;

/// CLI for drop-sync: maintain the release channel index and upload drops.
#[derive(Parser)]
#[clap(
    name = "drop-sync",
    version,
    about = "Synchronise the release channel index and upload build drops to blob storage",
    arg_required_else_help = true
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configured storage credentials
    Check,
    /// Update the lastModified timestamps of the release channels in the
    /// remote index.json and publish it back
    Sync,
    /// List local drops eligible for upload
    List,
    /// Upload local drops to a blob container
    Upload {
        /// Destination container name (defaults to the root container)
        #[clap(long)]
        container: Option<String>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let base_path = std::env::current_dir()?;
    let settings = load_config::load(&base_path)?;

    match cli.command {
        Commands::Check => check(&settings),
        Commands::Sync => sync(&settings).await,
        Commands::List => list(&settings),
        Commands::Upload { container } => {
            upload_drops(&settings, container.unwrap_or_else(|| ROOT_CONTAINER.to_string())).await
        }
    }
}

fn connect(settings: &Settings) -> Result<BlobClient> {
    BlobClient::new(settings).map_err(|e| {
        println!(
            "Invalid storage account information provided. \
             Please confirm the AccountName and AccountKey are valid."
        );
        anyhow::Error::new(e)
    })
}

fn check(settings: &Settings) -> Result<()> {
    connect(settings)?;
    println!("Successfully validated your connection string");
    Ok(())
}

async fn sync(settings: &Settings) -> Result<()> {
    let store = connect(settings)?;
    tracing::info!(command = "sync", "Starting channel index synchronisation");

    let channels = match index::fetch(&store, INDEX_BLOB).await {
        Ok(channels) => channels,
        Err(IndexError::NotFound) => {
            println!(
                "No index.json file was found at the specified location. \
                 Check the storage account and/or container name"
            );
            return Err(IndexError::NotFound.into());
        }
        Err(e) => return Err(e.into()),
    };

    let touched = index::touch(&channels, &RELEASE_CHANNELS)?;
    println!("{}", channel::encode(&touched)?);
    index::publish(&store, INDEX_BLOB, &touched).await?;
    tracing::info!(command = "sync", "Channel index synchronised");
    Ok(())
}

fn list(settings: &Settings) -> Result<()> {
    if !settings.directory.is_dir() {
        println!("Specified directory does not exist");
        anyhow::bail!("directory {} does not exist", settings.directory.display());
    }
    let drops = scan::scan(&settings.directory, &DROP_PREFIXES)?;
    for drop in &drops {
        if let Some(name) = drop.file_name().and_then(|n| n.to_str()) {
            println!("{name}");
        }
    }
    Ok(())
}

async fn upload_drops(settings: &Settings, container: String) -> Result<()> {
    let store = connect(settings)?;
    tracing::info!(command = "upload", container = %container, "Starting drop upload");

    match upload::run(&store, &container, &settings.directory).await {
        Ok(report) => {
            for name in &report.uploaded {
                println!("{name}");
            }
            tracing::info!(
                command = "upload",
                uploaded = report.uploaded.len(),
                "Drop upload complete"
            );
            Ok(())
        }
        Err(UploadError::Batch { uploaded, source }) => {
            // Drops sent before the failure stay uploaded; report them.
            for name in &uploaded {
                println!("{name}");
            }
            Err(anyhow::anyhow!(
                "upload aborted after {} successful file(s): {source}",
                uploaded.len()
            ))
        }
        Err(e) => Err(e.into()),
    }
}
