use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::update_url::UpdateQuery;

/// HTTP client settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole request, redirects included.
    pub timeout_secs: u64,
    /// Responses larger than this are aborted.
    pub max_download_bytes: u64,
    /// Optional `User-Agent` header; libcurl sends none by default.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 300,
            max_download_bytes: 256 * 1024 * 1024,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/crxdl/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrxdlConfig {
    /// Default destination for `fetch` when `-o` is not given (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub update: UpdateQuery,
    #[serde(default)]
    pub http: HttpConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("crxdl")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("failed to prepare config directory")
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CrxdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CrxdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CrxdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CrxdlConfig::default();
        assert!(cfg.download_dir.is_none());
        assert_eq!(cfg.update.os, "win");
        assert_eq!(cfg.update.arch, "x86-64");
        assert_eq!(cfg.http.connect_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.http.max_download_bytes, 256 * 1024 * 1024);
        assert!(cfg.http.user_agent.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CrxdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CrxdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: CrxdlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, CrxdlConfig::default());
    }

    #[test]
    fn config_toml_partial_sections() {
        let toml = r#"
            download_dir = "/srv/extensions"

            [update]
            os = "linux"

            [http]
            timeout_secs = 60
            user_agent = "crxdl/0.1"
        "#;
        let cfg: CrxdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.download_dir.as_deref(),
            Some(std::path::Path::new("/srv/extensions"))
        );
        assert_eq!(cfg.update.os, "linux");
        assert_eq!(cfg.update.arch, "x86-64");
        assert_eq!(cfg.update.prod_version, "9999.0.9999.0");
        assert_eq!(cfg.http.timeout(), Duration::from_secs(60));
        assert_eq!(cfg.http.connect_timeout_secs, 30);
        assert_eq!(cfg.http.user_agent.as_deref(), Some("crxdl/0.1"));
    }
}
