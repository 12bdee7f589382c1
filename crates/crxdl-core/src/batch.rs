//! Batch driver: fetch, persist and unwrap each extension in turn.
//!
//! Every identifier runs through its own pipeline and yields its own result.
//! A failure is logged and recorded; it never stops the rest of the batch.

use std::path::PathBuf;

use thiserror::Error;

use crate::checksum;
use crate::crx::{self, CrxError};
use crate::extension_id::ExtensionId;
use crate::fetch::{FetchError, Fetcher};
use crate::sink::{DirSink, Sink, SinkError};

pub const CONTAINER_EXT: &str = "crx";
pub const ARCHIVE_EXT: &str = "zip";

/// Everything a batch needs, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub destination: PathBuf,
    pub ids: Vec<ExtensionId>,
}

impl BatchConfig {
    /// Sink writing into `destination`.
    pub fn sink(&self) -> DirSink {
        DirSink::new(&self.destination)
    }
}

/// Files produced for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub id: ExtensionId,
    pub container_path: PathBuf,
    pub container_len: usize,
    pub archive_path: PathBuf,
    pub archive_len: usize,
    /// Lowercase hex SHA-256 of the extracted archive.
    pub archive_sha256: String,
}

/// Which step of the pipeline failed for one extension.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("download failed: {0}")]
    Fetch(#[source] FetchError),

    #[error("saving container failed: {0}")]
    PersistContainer(#[source] SinkError),

    /// The container is still on disk when this happens.
    #[error("not a usable CRX: {0}")]
    Unwrap(#[source] CrxError),

    #[error("saving archive failed: {0}")]
    PersistArchive(#[source] SinkError),
}

/// Fetch → persist `<id>.crx` → unwrap → persist `<id>.zip`.
pub fn process_one<F, S>(fetcher: &F, sink: &S, id: &ExtensionId) -> Result<ItemReport, ItemError>
where
    F: Fetcher + ?Sized,
    S: Sink + ?Sized,
{
    let container = fetcher.fetch(id).map_err(ItemError::Fetch)?;

    let container_path = sink
        .persist(&format!("{id}.{CONTAINER_EXT}"), &container)
        .map_err(ItemError::PersistContainer)?;

    let archive = crx::unwrap(&container).map_err(ItemError::Unwrap)?;

    let archive_path = sink
        .persist(&format!("{id}.{ARCHIVE_EXT}"), archive)
        .map_err(ItemError::PersistArchive)?;

    Ok(ItemReport {
        id: id.clone(),
        container_path,
        container_len: container.len(),
        archive_path,
        archive_len: archive.len(),
        archive_sha256: checksum::sha256_bytes(archive),
    })
}

/// Per-item results in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<(ExtensionId, Result<ItemReport, ItemError>)>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&ExtensionId, &ItemError)> {
        self.items
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (id, e)))
    }

    /// True when every item succeeded (an empty batch is clean).
    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Run the pipeline for every configured id, skipping past failures.
/// Files land in `config.destination`.
pub fn run_batch<F>(config: &BatchConfig, fetcher: &F) -> BatchReport
where
    F: Fetcher + ?Sized,
{
    let sink = config.sink();
    let mut report = BatchReport::default();
    for id in &config.ids {
        tracing::info!(%id, "processing");
        let result = process_one(fetcher, &sink, id);
        match &result {
            Ok(item) => tracing::info!(
                %id,
                archive = %item.archive_path.display(),
                bytes = item.archive_len,
                sha256 = %item.archive_sha256,
                "extracted"
            ),
            Err(e) => tracing::warn!(%id, "skipped: {}", e),
        }
        report.items.push((id.clone(), result));
    }
    tracing::info!(
        total = report.items.len(),
        failed = report.failed().count(),
        destination = %config.destination.display(),
        "batch finished"
    );
    report
}
