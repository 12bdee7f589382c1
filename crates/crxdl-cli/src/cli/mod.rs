//! CLI for crxdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use crxdl_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_completions, run_fetch, run_manpage, run_unwrap, run_url};

/// Top-level CLI for crxdl.
#[derive(Debug, Parser)]
#[command(name = "crxdl")]
#[command(about = "Download browser extensions and extract their ZIP archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download extensions by ID and extract each archive.
    Fetch {
        /// Extension ID or store URL. Repeat for several; read from stdin when omitted.
        #[arg(short = 'i', long = "extension-id", value_name = "ID")]
        ids: Vec<String>,

        /// Directory to write `<id>.crx` and `<id>.zip` into.
        #[arg(short = 'o', long = "download-location", value_name = "DIR")]
        download_location: Option<PathBuf>,
    },

    /// Extract the archive from a CRX file already on disk.
    Unwrap {
        /// Path to the `.crx` file.
        path: PathBuf,

        /// Output path (default: input with a `.zip` extension).
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the download URL for an extension.
    Url {
        /// Extension ID or store URL.
        id: String,
    },

    /// Compute SHA-256 of a file (e.g. an extracted archive).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print a man page (roff).
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                ids,
                download_location,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, ids, download_location).await?;
            }
            CliCommand::Unwrap { path, output } => run_unwrap(&path, output.as_deref()).await?,
            CliCommand::Url { id } => {
                let cfg = config::load_or_init()?;
                run_url(&cfg, &id).await?;
            }
            CliCommand::Checksum { path } => run_checksum(&path).await?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
