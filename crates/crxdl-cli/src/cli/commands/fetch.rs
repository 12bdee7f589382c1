//! `crxdl fetch` – download extensions and extract their archives.

use anyhow::{Context, Result};
use crxdl_core::batch::{self, BatchConfig, BatchReport};
use crxdl_core::config::CrxdlConfig;
use crxdl_core::extension_id::{self, select_ids};
use crxdl_core::fetch::{CurlFetcher, Fetcher};
use std::io::{self, Write};
use std::path::PathBuf;

/// Interactive input: one ID or URL per line, blank line to finish.
fn prompt_ids() -> Result<Vec<String>> {
    print!("\nEnter extension URLs or IDs, one per line. Finish with an empty line:\n\n");
    io::stdout().flush()?;
    extension_id::read_lines(io::stdin().lock()).context("read extension ids from stdin")
}

/// `-o` wins, then `download_dir` from the config, then the current directory.
fn destination(download_location: Option<PathBuf>, cfg: &CrxdlConfig) -> Result<PathBuf> {
    match download_location.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("resolve current directory"),
    }
}

fn print_report(report: &BatchReport) {
    for (id, result) in &report.items {
        match result {
            Ok(item) => println!(
                "ok    {}  {} ({} bytes)  sha256 {}",
                id,
                item.archive_path.display(),
                item.archive_len,
                item.archive_sha256
            ),
            Err(e) => println!("FAIL  {}  {}", id, e),
        }
    }
}

/// Validate inputs, run the whole batch, then fail if any item failed.
fn fetch_all<F>(fetcher: &F, inputs: &[String], destination: PathBuf) -> Result<BatchReport>
where
    F: Fetcher + ?Sized,
{
    let selection = select_ids(inputs);
    for input in &selection.rejected {
        tracing::warn!(%input, "no extension id found, skipping");
        eprintln!("skipping {:?}: no extension id found", input);
    }
    if selection.accepted.is_empty() {
        anyhow::bail!("no valid extension ids given");
    }

    let config = BatchConfig {
        destination,
        ids: selection.accepted,
    };
    let report = batch::run_batch(&config, fetcher);
    print_report(&report);

    let failed = report.failed().count();
    if failed > 0 {
        anyhow::bail!("{} of {} extension(s) failed", failed, report.items.len());
    }
    Ok(report)
}

pub async fn run_fetch(
    cfg: &CrxdlConfig,
    ids: Vec<String>,
    download_location: Option<PathBuf>,
) -> Result<()> {
    let inputs = if ids.is_empty() { prompt_ids()? } else { ids };
    let destination = destination(download_location, cfg)?;
    let fetcher = CurlFetcher::new(cfg.update.clone(), cfg.http.clone());

    tokio::task::spawn_blocking(move || fetch_all(&fetcher, &inputs, destination))
        .await
        .context("fetch task join")??;
    Ok(())
}
