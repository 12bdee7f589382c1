//! CRX container unwrapping.
//!
//! A CRX3 file is laid out as:
//!
//! ```text
//! [4 bytes]  "Cr24" magic
//! [4 bytes]  format version, u32 little-endian (must be 3)
//! [4 bytes]  N, header length, u32 little-endian
//! [N bytes]  header (signed CrxFileHeader, not interpreted here)
//! [rest]     ZIP archive
//! ```
//!
//! Only version 3 is accepted. Older CRX2 containers have a different prefix
//! layout and are rejected with [`CrxError::UnsupportedVersion`].

mod error;
mod reader;

pub use error::CrxError;

use reader::ByteReader;

/// `Cr24`.
pub const MAGIC: [u8; 4] = *b"Cr24";

/// The only container version this crate understands.
pub const SUPPORTED_VERSION: u32 = 3;

/// Magic (4) + version (4) + header length (4).
pub const PREFIX_LEN: usize = 12;

/// Borrowed view of a validated container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crx<'a> {
    pub version: u32,
    /// Raw header bytes between the fixed prefix and the archive.
    pub header: &'a [u8],
    /// Embedded archive, returned unmodified.
    pub archive: &'a [u8],
}

impl Crx<'_> {
    /// Offset of the archive within the original buffer.
    pub fn payload_offset(&self) -> usize {
        PREFIX_LEN + self.header.len()
    }
}

/// Validate the container prefix and split the buffer into header and archive.
pub fn parse(buf: &[u8]) -> Result<Crx<'_>, CrxError> {
    let mut reader = ByteReader::new(buf);

    // Magic and version are checked together: anything under 8 bytes is truncated
    // even if the first bytes already look wrong.
    let lead: [u8; 8] = reader.read_array()?;
    let magic = [lead[0], lead[1], lead[2], lead[3]];
    if magic != MAGIC {
        return Err(CrxError::InvalidMagic { found: magic });
    }
    let version = u32::from_le_bytes([lead[4], lead[5], lead[6], lead[7]]);
    if version != SUPPORTED_VERSION {
        return Err(CrxError::UnsupportedVersion { found: version });
    }

    let header_len = reader.read_u32_le()?;
    let header_len = usize::try_from(header_len).map_err(|_| CrxError::TruncatedInput {
        needed: PREFIX_LEN as u64 + u64::from(header_len),
        available: buf.len(),
    })?;
    let header = reader.take(header_len)?;

    Ok(Crx {
        version,
        header,
        archive: reader.rest(),
    })
}

/// Return the archive embedded in a CRX3 container.
///
/// Pure function over the input: no I/O, no allocation, safe to call from
/// any thread.
pub fn unwrap(buf: &[u8]) -> Result<&[u8], CrxError> {
    parse(buf).map(|crx| crx.archive)
}
