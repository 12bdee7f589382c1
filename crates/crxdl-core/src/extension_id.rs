//! Extension identifiers and where they come from.
//!
//! An identifier is exactly 32 ASCII lowercase letters. Users may paste a
//! bare identifier or a store URL that contains one; [`ExtensionId::find_in`]
//! handles both.

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use thiserror::Error;

/// Length of an extension identifier.
pub const ID_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not an extension id (expected 32 lowercase letters): {0:?}")]
pub struct InvalidExtensionId(pub String);

/// A validated extension identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Strict parse: the whole input must be an identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidExtensionId> {
        if s.len() == ID_LEN && s.bytes().all(|b| b.is_ascii_lowercase()) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidExtensionId(s.to_string()))
        }
    }

    /// Find an identifier inside free-form text such as
    /// `https://chromewebstore.google.com/detail/name/<id>`.
    ///
    /// Returns the first maximal run of lowercase letters that is exactly
    /// 32 long. Longer runs are not cut down to 32.
    pub fn find_in(text: &str) -> Option<Self> {
        text.split(|c: char| !c.is_ascii_lowercase())
            .find(|run| run.len() == ID_LEN)
            .map(|run| Self(run.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExtensionId {
    type Err = InvalidExtensionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ExtensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Read one input per line until the first empty line or EOF. Lines are trimmed.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}

/// Outcome of validating a list of raw inputs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdSelection {
    /// Unique identifiers, in first-seen order.
    pub accepted: Vec<ExtensionId>,
    /// Inputs that did not contain an identifier.
    pub rejected: Vec<String>,
}

/// Extract identifiers from raw inputs (bare ids or URLs), dropping duplicates.
pub fn select_ids<I, S>(inputs: I) -> IdSelection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = IdSelection::default();
    for input in inputs {
        let input = input.as_ref().trim();
        match ExtensionId::find_in(input) {
            Some(id) if selection.accepted.contains(&id) => {
                tracing::debug!(%id, "duplicate extension id ignored");
            }
            Some(id) => selection.accepted.push(id),
            None => selection.rejected.push(input.to_string()),
        }
    }
    selection
}
