//! K-way grouping merge
//!
//! Groups entries with equal keys across several strictly sorted
//! constraint-map streams:
//!
//! ```text
//! input 0: k1 ||| 1 2        output: k1 ||| 0:1 0:2 1:9
//!          k3 ||| 5                  k2 ||| 1:4
//! input 1: k1 ||| 9                  k3 ||| 0:5
//!          k2 ||| 4
//! ```

use crate::cursor::{CursorOptions, KeyedStreamCursor};
use crate::entry::IdList;
use crate::error::MergeResult;
use crate::format::TableFormat;
use crate::output::{write_payload, MergeStats, OutputRecord};
use std::io::{self, BufRead, Write};

/// One output line of the grouping merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedRecord {
    /// Shared key
    pub key: Vec<u8>,
    /// `(source index, id)` pairs, grouped by source in input order
    pub ids: Vec<(usize, u64)>,
}

impl OutputRecord for CombinedRecord {
    fn write_to<W: Write + ?Sized>(&self, out: &mut W, format: &TableFormat) -> io::Result<()> {
        out.write_all(&self.key)?;
        write!(out, " {}", format.delimiter)?;
        write_payload(out, &format.id_separator, &self.ids, |out, (source, id)| {
            write!(out, "{source}{}{id}", format.source_separator)
        })
    }
}

/// Streaming group-by-key over strictly sorted inputs
///
/// Holds one entry per input in memory. Yields records in strictly
/// ascending key order; the first error ends the sequence.
#[derive(Debug)]
pub struct GroupingMerge<R> {
    cursors: Vec<KeyedStreamCursor<R, IdList>>,
    records: usize,
    finished: bool,
}

impl<R: BufRead> GroupingMerge<R> {
    /// Open strict cursors over `inputs`, each paired with its description
    ///
    /// # Errors
    /// Returns the first error raised while reading an input's first entry
    pub fn open<I, D>(inputs: I, format: &TableFormat) -> MergeResult<Self>
    where
        I: IntoIterator<Item = (R, D)>,
        D: Into<String>,
    {
        let cursors = inputs
            .into_iter()
            .map(|(reader, description)| {
                let options = CursorOptions::strict(description).with_format(format.clone());
                KeyedStreamCursor::new(reader, options)
            })
            .collect::<MergeResult<Vec<_>>>()?;
        Ok(Self::from_cursors(cursors))
    }

    /// Merge already-open cursors
    ///
    /// Output keys are only guaranteed strictly ascending if every cursor
    /// uses [`Discipline::Strict`](crate::Discipline::Strict).
    #[must_use]
    pub fn from_cursors(cursors: Vec<KeyedStreamCursor<R, IdList>>) -> Self {
        Self {
            cursors,
            records: 0,
            finished: false,
        }
    }

    /// Counters for the run so far
    #[must_use]
    pub fn stats(&self) -> MergeStats {
        MergeStats {
            records: self.records,
            entries_read: self.cursors.iter().map(KeyedStreamCursor::entries_read).collect(),
        }
    }

    fn smallest_key(&self) -> Option<Vec<u8>> {
        self.cursors
            .iter()
            .filter_map(KeyedStreamCursor::key)
            .min()
            .map(<[u8]>::to_vec)
    }

    fn next_record(&mut self) -> MergeResult<Option<CombinedRecord>> {
        let Some(key) = self.smallest_key() else {
            return Ok(None);
        };

        let mut ids = Vec::new();
        for (source, cursor) in self.cursors.iter_mut().enumerate() {
            let Some(entry) = cursor.current() else {
                continue;
            };
            if entry.key != key {
                continue;
            }
            ids.extend(entry.payload.0.iter().map(|&id| (source, id)));
            cursor.advance()?;
        }

        Ok(Some(CombinedRecord { key, ids }))
    }
}

impl<R: BufRead> Iterator for GroupingMerge<R> {
    type Item = MergeResult<CombinedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => {
                self.records += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.finished = true;
                let stats = self.stats();
                tracing::info!(
                    records = stats.records,
                    inputs = self.cursors.len(),
                    entries = ?stats.entries_read,
                    "grouping merge finished"
                );
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
