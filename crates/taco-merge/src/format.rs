//! Line format configuration
//!
//! Keyed tables are text files of `<key> <delimiter> <payload>` lines.

use serde::{Deserialize, Serialize};

/// Separators used to read and write keyed table lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFormat {
    /// Separator between key and payload
    pub delimiter: String,
    /// Separator between ids in written payloads
    pub id_separator: String,
    /// Separator between source index and id in combined output
    pub source_separator: String,
}

impl TableFormat {
    /// Create default format (`|||`, space, `:`)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With key/payload delimiter
    #[inline]
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// With id separator
    #[inline]
    #[must_use]
    pub fn with_id_separator(mut self, separator: impl Into<String>) -> Self {
        self.id_separator = separator.into();
        self
    }

    /// With source/id separator
    #[inline]
    #[must_use]
    pub fn with_source_separator(mut self, separator: impl Into<String>) -> Self {
        self.source_separator = separator.into();
        self
    }

    /// Split `line` at the first delimiter, trimming both sides
    ///
    /// Returns `None` if the delimiter is absent.
    #[must_use]
    pub fn split<'l>(&self, line: &'l [u8]) -> Option<(&'l [u8], &'l [u8])> {
        let needle = self.delimiter.as_bytes();
        if needle.is_empty() || needle.len() > line.len() {
            return None;
        }
        let at = line.windows(needle.len()).position(|w| w == needle)?;
        Some((trim(&line[..at]), trim(&line[at + needle.len()..])))
    }
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: "|||".to_string(),
            id_separator: " ".to_string(),
            source_separator: ":".to_string(),
        }
    }
}

/// Trim ASCII whitespace from both ends
pub(crate) fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
