//! Two-way sorted equi-join
//!
//! Matches a rule-table index (`<key> ||| <line-number>`, keys may repeat)
//! against a constraint map (`<key> ||| <id> ...`, keys effectively unique),
//! emitting `<line-number> ||| <id> ...` for every index entry whose key
//! appears in the map.

use crate::cursor::{CursorOptions, KeyedStreamCursor};
use crate::entry::{IdList, LineNumber};
use crate::error::MergeResult;
use crate::format::TableFormat;
use crate::output::{write_payload, MergeStats, OutputRecord};
use std::cmp::Ordering;
use std::io::{self, BufRead, Write};

/// One output line of the equi-join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRecord {
    /// Line number from the index side
    pub line_number: u64,
    /// Ids from the map side
    pub ids: Vec<u64>,
}

impl OutputRecord for JoinedRecord {
    fn write_to<W: Write + ?Sized>(&self, out: &mut W, format: &TableFormat) -> io::Result<()> {
        write!(out, "{} {}", self.line_number, format.delimiter)?;
        write_payload(out, &format.id_separator, &self.ids, |out, id| write!(out, "{id}"))
    }
}

/// Streaming merge-join of an index stream against a map stream
///
/// Both cursors are non-strict. On a key match the record is emitted and
/// only the index side advances, on the following call, so one map entry
/// can satisfy a run of equal index keys. Terminates when either side is
/// exhausted.
#[derive(Debug)]
pub struct EquiJoin<L, R> {
    index: KeyedStreamCursor<L, LineNumber>,
    map: KeyedStreamCursor<R, IdList>,
    records: usize,
    index_matched: bool,
    finished: bool,
}

impl<L: BufRead, R: BufRead> EquiJoin<L, R> {
    /// Open non-strict cursors over both inputs
    ///
    /// # Errors
    /// Returns the first error raised while reading either first entry
    pub fn open(
        index: (L, impl Into<String>),
        map: (R, impl Into<String>),
        format: &TableFormat,
    ) -> MergeResult<Self> {
        let index = KeyedStreamCursor::new(
            index.0,
            CursorOptions::non_strict(index.1).with_format(format.clone()),
        )?;
        let map = KeyedStreamCursor::new(
            map.0,
            CursorOptions::non_strict(map.1).with_format(format.clone()),
        )?;
        Ok(Self::from_cursors(index, map))
    }

    /// Join already-open cursors
    #[must_use]
    pub fn from_cursors(
        index: KeyedStreamCursor<L, LineNumber>,
        map: KeyedStreamCursor<R, IdList>,
    ) -> Self {
        Self {
            index,
            map,
            records: 0,
            index_matched: false,
            finished: false,
        }
    }

    /// Counters for the run so far; inputs are ordered index, map
    #[must_use]
    pub fn stats(&self) -> MergeStats {
        MergeStats {
            records: self.records,
            entries_read: vec![self.index.entries_read(), self.map.entries_read()],
        }
    }

    fn next_record(&mut self) -> MergeResult<Option<JoinedRecord>> {
        if self.index_matched {
            self.index_matched = false;
            self.index.advance()?;
        }
        loop {
            let (Some(left), Some(right)) = (self.index.current(), self.map.current()) else {
                return Ok(None);
            };

            match left.key.cmp(&right.key) {
                Ordering::Less => self.index.advance()?,
                Ordering::Greater => self.map.advance()?,
                Ordering::Equal => {
                    self.index_matched = true;
                    return Ok(Some(JoinedRecord {
                        line_number: left.payload.0,
                        ids: right.payload.0.clone(),
                    }));
                }
            }
        }
    }
}

impl<L: BufRead, R: BufRead> Iterator for EquiJoin<L, R> {
    type Item = MergeResult<JoinedRecord>;

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
                tracing::info!(
                    records = self.records,
                    index_entries = self.index.entries_read(),
                    map_entries = self.map.entries_read(),
                    "equi-join finished"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;

    fn join(index: &str, map: &str) -> MergeResult<Vec<String>> {
        let format = TableFormat::new();
        EquiJoin::open((index.as_bytes(), "index"), (map.as_bytes(), "map"), &format)?
            .map(|record| record.map(|r| r.to_line(&format)))
            .collect()
    }

    #[test]
    fn one_map_entry_serves_a_run() {
        let lines = join("s ||| 10\ns ||| 11\nt ||| 12\n", "s ||| 7 8\n").unwrap();
        assert_eq!(lines, ["10 ||| 7 8", "11 ||| 7 8"]);
    }

    #[test]
    fn skips_unmatched_keys_on_both_sides() {
        let index = "a ||| 1\nc ||| 2\nc ||| 3\ne ||| 4\n";
        let map = "b ||| 9\nc ||| 5\nd ||| 6\ne ||| 7\nf ||| 8\n";
        assert_eq!(join(index, map).unwrap(), ["2 ||| 5", "3 ||| 5", "4 ||| 7"]);
    }

    #[test]
    fn empty_side_yields_nothing() {
        assert!(join("", "a ||| 1\n").unwrap().is_empty());
        assert!(join("a ||| 1\n", "").unwrap().is_empty());
    }

    #[test]
    fn index_order_violation_fails() {
        let err = join("b ||| 1\na ||| 2\n", "a ||| 1\nb ||| 2\n").unwrap_err();
        assert!(matches!(
            err,
            MergeError::OrderViolation { ref description, .. } if description == "index"
        ));
    }

    #[test]
    fn stops_before_reading_past_exhausted_side() {
        // The unsorted tail of the index is never reached once the map ends
        let lines = join("a ||| 1\nz ||| 2\nb ||| 3\n", "a ||| 4\n").unwrap();
        assert_eq!(lines, ["1 ||| 4"]);
    }

    #[test]
    fn match_is_emitted_before_index_violation() {
        let format = TableFormat::new();
        let mut join = EquiJoin::open(
            ("b ||| 1\na ||| 2\n".as_bytes(), "index"),
            ("b ||| 7\n".as_bytes(), "map"),
            &format,
        )
        .unwrap();

        let first = join.next().unwrap().unwrap();
        assert_eq!(first.to_line(&format), "1 ||| 7");
        assert!(join.next().unwrap().unwrap_err().is_order_violation());
        assert!(join.next().is_none());
    }

    #[test]
    fn bad_line_number_fails() {
        let err = join("a ||| one\n", "a ||| 1\n").unwrap_err();
        assert!(matches!(err, MergeError::Syntax { line: 1, .. }));
    }

    #[test]
    fn stats_after_join() {
        let format = TableFormat::new();
        let mut join = EquiJoin::open(
            ("s ||| 10\ns ||| 11\n".as_bytes(), "index"),
            ("s ||| 7\n".as_bytes(), "map"),
            &format,
        )
        .unwrap();
        assert_eq!(join.by_ref().count(), 2);
        assert_eq!(join.stats().records, 2);
        assert_eq!(join.stats().entries_read, vec![2, 1]);
    }
}
