//! Keyed stream cursor
//!
//! Forward-only position over a sorted table, read one line per advance.

use crate::entry::{KeyedEntry, Payload};
use crate::error::{MergeError, MergeResult};
use crate::format::TableFormat;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::io::BufRead;

/// Ordering a stream's keys must follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    /// Each key strictly greater than the previous one
    Strict,
    /// Each key greater than or equal to the previous one
    NonStrict,
}

impl Discipline {
    /// Check whether `next` may follow `previous`
    #[inline]
    #[must_use]
    pub fn admits(self, previous: &[u8], next: &[u8]) -> bool {
        match self {
            Self::Strict => next > previous,
            Self::NonStrict => next >= previous,
        }
    }

    /// Relation required between consecutive keys
    #[must_use]
    pub const fn relation(self) -> &'static str {
        match self {
            Self::Strict => "greater than",
            Self::NonStrict => "greater than or equal to",
        }
    }
}

impl Display for Discipline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::NonStrict => f.write_str("non-strict"),
        }
    }
}

/// Cursor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorOptions {
    /// Stream description used in diagnostics
    pub description: String,
    /// Key ordering enforced on every advance
    pub discipline: Discipline,
    /// Line format
    pub format: TableFormat,
}

impl CursorOptions {
    /// Options for a strictly ordered stream
    #[must_use]
    pub fn strict(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            discipline: Discipline::Strict,
            format: TableFormat::default(),
        }
    }

    /// Options for a non-strictly ordered stream
    #[must_use]
    pub fn non_strict(description: impl Into<String>) -> Self {
        Self {
            discipline: Discipline::NonStrict,
            ..Self::strict(description)
        }
    }

    /// With line format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: TableFormat) -> Self {
        self.format = format;
        self
    }
}

/// Forward-only cursor over a sorted keyed table
///
/// Construction reads the first entry. Each [`advance`](Self::advance)
/// reads exactly one more entry and checks it against the previous key.
/// End of input or a blank line exhausts the cursor.
///
/// # Example
/// ```
/// use taco_merge::{CursorOptions, IdList, KeyedStreamCursor};
///
/// let input = "a ||| 1\nb ||| 2 3\n";
/// let mut cursor =
///     KeyedStreamCursor::<_, IdList>::new(input.as_bytes(), CursorOptions::strict("input")).unwrap();
///
/// assert_eq!(cursor.key(), Some(&b"a"[..]));
/// cursor.advance().unwrap();
/// assert_eq!(cursor.current().unwrap().payload, IdList(vec![2, 3]));
/// cursor.advance().unwrap();
/// assert!(cursor.at_end());
/// ```
#[derive(Debug)]
pub struct KeyedStreamCursor<R, P> {
    reader: R,
    options: CursorOptions,
    buf: Vec<u8>,
    line: usize,
    entries_read: usize,
    current: Option<KeyedEntry<P>>,
}

impl<R: BufRead, P: Payload> KeyedStreamCursor<R, P> {
    /// Open cursor and read the first entry
    ///
    /// # Errors
    /// Returns [`MergeError`] if the first entry cannot be read or parsed
    pub fn new(reader: R, options: CursorOptions) -> MergeResult<Self> {
        tracing::debug!(
            stream = %options.description,
            discipline = %options.discipline,
            "opening keyed stream"
        );
        let mut cursor = Self {
            reader,
            options,
            buf: Vec::new(),
            line: 0,
            entries_read: 0,
            current: None,
        };
        cursor.current = cursor.read_entry()?;
        Ok(cursor)
    }

    /// Returns true once the stream is exhausted
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Current entry, `None` at end
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&KeyedEntry<P>> {
        self.current.as_ref()
    }

    /// Key of the current entry
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|entry| entry.key.as_slice())
    }

    /// Stream description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.options.description
    }

    /// Ordering discipline
    #[inline]
    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.options.discipline
    }

    /// Number of entries read so far
    #[inline]
    #[must_use]
    pub fn entries_read(&self) -> usize {
        self.entries_read
    }

    /// Move to the next entry
    ///
    /// Does nothing once the cursor is at end.
    ///
    /// # Errors
    /// Returns [`MergeError::OrderViolation`] if the next key breaks the
    /// discipline, or a syntax/IO error if it cannot be read
    pub fn advance(&mut self) -> MergeResult<()> {
        let Some(previous) = self.current.take() else {
            return Ok(());
        };

        let next = self.read_entry()?;
        if let Some(entry) = &next {
            if !self.options.discipline.admits(&previous.key, &entry.key) {
                return Err(MergeError::OrderViolation {
                    description: self.options.description.clone(),
                    previous_line: previous.line,
                    line: entry.line,
                    discipline: self.options.discipline,
                });
            }
        }

        self.current = next;
        Ok(())
    }

    fn read_entry(&mut self) -> MergeResult<Option<KeyedEntry<P>>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| MergeError::io_error(self.options.description.clone(), e))?;
        let text = strip_newline(&self.buf);

        if n == 0 || text.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(
                stream = %self.options.description,
                entries = self.entries_read,
                blank_line = n > 0,
                "keyed stream exhausted"
            );
            return Ok(None);
        }

        self.line += 1;
        let entry = KeyedEntry::parse(text, self.line, &self.options.format)
            .map_err(|message| {
                MergeError::syntax(self.options.description.clone(), self.line, message)
            })?;
        self.entries_read += 1;
        tracing::trace!(
            stream = %self.options.description,
            line = self.line,
            key = %entry.key_lossy(),
            "read entry"
        );
        Ok(Some(entry))
    }
}

fn strip_newline(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
