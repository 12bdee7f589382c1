//! Persisting downloaded containers and extracted archives.
//!
//! [`DirSink`] writes `<name>.part` in the destination directory, syncs it,
//! then renames it over `<name>`, so a crash never leaves a half-written
//! file under the final name.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

#[derive(Debug, Error)]
#[error("{action} {}: {source}", .path.display())]
pub struct SinkError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl SinkError {
    fn new(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Destination for named byte buffers.
pub trait Sink {
    /// Store `bytes` under `name` and return where they ended up.
    fn persist(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError>;
}

/// Path for the temp file: appends `.part` to the final path (e.g. `x.crx` → `x.crx.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes files into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for DirSink {
    fn persist(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| SinkError::new("create directory", &self.dir, e))?;

        let final_path = self.dir.join(name);
        let tp = temp_path(&final_path);

        let write = || -> std::io::Result<()> {
            let mut f = File::create(&tp)?;
            f.write_all(bytes)?;
            f.sync_all()
        };
        if let Err(e) = write() {
            let _ = std::fs::remove_file(&tp);
            return Err(SinkError::new("write", &tp, e));
        }

        std::fs::rename(&tp, &final_path).map_err(|e| {
            let _ = std::fs::remove_file(&tp);
            SinkError::new("rename", &final_path, e)
        })?;
        tracing::debug!(path = %final_path.display(), bytes = bytes.len(), "persisted");
        Ok(final_path)
    }
}
