//! `crxdl unwrap <crx>` – extract the archive from a local CRX file.

use anyhow::{Context, Result};
use crxdl_core::crx;
use crxdl_core::sink::{DirSink, Sink};
use std::path::{Path, PathBuf};

/// `<stem>.zip` next to the input, or `<stem>.unwrapped.zip` when the input
/// is itself named `.zip`.
fn default_output(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "zip") {
        path.with_extension("unwrapped.zip")
    } else {
        path.with_extension("zip")
    }
}

/// True when `out` resolves to the same file as the existing `input`.
fn is_same_file(input: &Path, out: &Path) -> Result<bool> {
    let input = input
        .canonicalize()
        .with_context(|| format!("resolve {}", input.display()))?;
    Ok(out.canonicalize().is_ok_and(|out| out == input))
}

pub async fn run_unwrap(path: &Path, output: Option<&Path>) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let parsed = crx::parse(&data).with_context(|| format!("unwrap {}", path.display()))?;

    let out = output.map(Path::to_path_buf).unwrap_or_else(|| default_output(path));
    if is_same_file(path, &out)? {
        anyhow::bail!("output would overwrite input {}", path.display());
    }
    let name = out
        .file_name()
        .with_context(|| format!("output path has no file name: {}", out.display()))?
        .to_string_lossy()
        .into_owned();
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let written = DirSink::new(dir).persist(&name, parsed.archive)?;
    tracing::info!(
        input = %path.display(),
        output = %written.display(),
        header_len = parsed.header.len(),
        "unwrapped"
    );
    println!(
        "wrote {} ({} bytes, skipped {} header bytes)",
        written.display(),
        parsed.archive.len(),
        parsed.payload_offset()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_swaps_extension() {
        assert_eq!(
            default_output(Path::new("/tmp/abc.crx")),
            PathBuf::from("/tmp/abc.zip")
        );
        assert_eq!(default_output(Path::new("abc")), PathBuf::from("abc.zip"));
        assert_eq!(
            default_output(Path::new("/tmp/abc.zip")),
            PathBuf::from("/tmp/abc.unwrapped.zip")
        );
    }

    fn write_crx3(path: &Path) -> Vec<u8> {
        let mut data = b"Cr24".to_vec();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(b"PK\x03\x04");
        std::fs::write(path, &data).unwrap();
        data
    }

    #[tokio::test]
    async fn unwrap_writes_payload_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ext.crx");
        write_crx3(&input);

        run_unwrap(&input, None).await.unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("ext.zip")).unwrap(),
            b"PK\x03\x04"
        );
    }

    #[tokio::test]
    async fn unwrap_zip_named_input_keeps_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ext.zip");
        let data = write_crx3(&input);

        run_unwrap(&input, None).await.unwrap();
        assert_eq!(std::fs::read(&input).unwrap(), data);
        assert_eq!(
            std::fs::read(dir.path().join("ext.unwrapped.zip")).unwrap(),
            b"PK\x03\x04"
        );
    }

    #[tokio::test]
    async fn unwrap_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ext.crx");
        let data = write_crx3(&input);

        let same = dir.path().join(".").join("ext.crx");
        let err = run_unwrap(&input, Some(same.as_path())).await.unwrap_err();
        assert!(err.to_string().contains("would overwrite input"));
        assert_eq!(std::fs::read(&input).unwrap(), data);
    }

    #[tokio::test]
    async fn unwrap_rejects_non_crx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.zip");
        std::fs::write(&input, b"PK\x03\x04 not a crx").unwrap();
        let out = dir.path().join("out.zip");

        let err = run_unwrap(&input, Some(out.as_path())).await.unwrap_err();
        assert!(format!("{:#}", err).contains("invalid magic"));
        assert!(!out.exists());
    }
}
