pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod crx;
pub mod extension_id;
pub mod fetch;
pub mod sink;
pub mod update_url;
