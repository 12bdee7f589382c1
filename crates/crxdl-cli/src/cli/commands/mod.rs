//! CLI command handlers, one file per command.

mod checksum;
mod completions;
mod fetch;
mod unwrap;
mod url;

pub use checksum::run_checksum;
pub use completions::{run_completions, run_manpage};
pub use fetch::run_fetch;
pub use unwrap::run_unwrap;
pub use url::run_url;
