//! `crxdl url <id>` – print the download URL for an extension.

use anyhow::{Context, Result};
use crxdl_core::config::CrxdlConfig;
use crxdl_core::extension_id::ExtensionId;

pub async fn run_url(cfg: &CrxdlConfig, input: &str) -> Result<()> {
    let id = ExtensionId::find_in(input)
        .with_context(|| format!("no extension id found in {:?}", input))?;
    let url = cfg.update.url_for(&id).context("build update URL")?;
    println!("{}", url);
    Ok(())
}
