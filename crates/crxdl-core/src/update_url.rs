//! Download URL for an extension on the vendor update endpoint.
//!
//! The endpoint speaks the Omaha update protocol; with `response=redirect`
//! it answers a single-item query with a redirect to the CRX itself.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::extension_id::ExtensionId;

pub const DEFAULT_BASE_URL: &str =
    "https://clients2.google.com/service/update2/crx?response=redirect";

/// Query parameters sent with every download request (`[update]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateQuery {
    /// Endpoint, including any fixed query pairs.
    pub base_url: String,
    /// One of win, linux, mac, android, openbsd, cros.
    pub os: String,
    /// One of x86-32, x86-64, arm. Also sent as the NaCl architecture.
    pub arch: String,
    pub prod: String,
    pub prod_channel: String,
    /// The store answers 204 to clients older than 31.0.1609.0, so claim a
    /// version far in the future.
    pub prod_version: String,
    pub accept_format: String,
}

impl Default for UpdateQuery {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            os: "win".to_string(),
            arch: "x86-64".to_string(),
            prod: "chromiumcrx".to_string(),
            prod_channel: "unknown".to_string(),
            prod_version: "9999.0.9999.0".to_string(),
            accept_format: "crx2,crx3".to_string(),
        }
    }
}

impl UpdateQuery {
    /// Build the download URL for `id`. Query pairs already present in
    /// `base_url` are kept in front.
    pub fn url_for(&self, id: &ExtensionId) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("os", &self.os)
            .append_pair("arch", &self.arch)
            .append_pair("nacl_arch", &self.arch)
            .append_pair("prod", &self.prod)
            .append_pair("prodchannel", &self.prod_channel)
            .append_pair("prodversion", &self.prod_version)
            .append_pair("acceptformat", &self.accept_format)
            .append_pair("x", &format!("id={}&uc", id));
        Ok(url)
    }
}
