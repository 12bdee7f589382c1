//! Error type for CRX container parsing.

use thiserror::Error;

/// Why a buffer could not be unwrapped into its embedded archive.
///
/// Each kind is distinct so a batch can log a precise diagnosis per extension
/// and move on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrxError {
    /// The buffer ended before a field (or the declared header) could be read.
    #[error("truncated input: need {needed} bytes, have {available}")]
    TruncatedInput { needed: u64, available: usize },

    /// The first four bytes are not `Cr24`.
    #[error("invalid magic {found:02x?}, expected \"Cr24\"")]
    InvalidMagic { found: [u8; 4] },

    /// Magic is fine but the container version is not 3.
    #[error("unsupported CRX format version {found} (only version 3 is supported)")]
    UnsupportedVersion { found: u32 },
}
