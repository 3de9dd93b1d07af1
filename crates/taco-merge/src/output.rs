//! Output records and writers

use crate::error::{MergeError, MergeResult};
use crate::format::TableFormat;
use std::io::{self, Write};

/// Record that can be written as one table line
pub trait OutputRecord {
    /// Write the record, without trailing newline
    ///
    /// # Errors
    /// Propagates IO errors from `out`
    fn write_to<W: Write + ?Sized>(&self, out: &mut W, format: &TableFormat) -> io::Result<()>;

    /// Render the record as a line (lossy for non-UTF-8 keys)
    fn to_line(&self, format: &TableFormat) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf, format);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Counters reported after a merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Output records produced
    pub records: usize,
    /// Entries read from each input, in input order
    pub entries_read: Vec<usize>,
}

/// Stream `records` into `out`, one line each
///
/// Stops at the first error; lines already written stay written.
///
/// # Errors
/// Returns the first record error, or [`MergeError::Io`] if writing fails
pub fn write_records<I, T, W>(records: I, out: &mut W, format: &TableFormat) -> MergeResult<usize>
where
    I: Iterator<Item = MergeResult<T>>,
    T: OutputRecord,
    W: Write + ?Sized,
{
    let mut written = 0;
    for record in records {
        let record = record?;
        record
            .write_to(out, format)
            .and_then(|()| out.write_all(b"\n"))
            .map_err(|e| MergeError::io_error("output", e))?;
        written += 1;
    }
    out.flush().map_err(|e| MergeError::io_error("output", e))?;
    Ok(written)
}

/// Write `items` joined by `separator`, preceded by a single space
pub(crate) fn write_payload<W, I, F>(
    out: &mut W,
    separator: &str,
    items: I,
    mut write_item: F,
) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    F: FnMut(&mut W, I::Item) -> io::Result<()>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i == 0 {
            out.write_all(b" ")?;
        } else {
            out.write_all(separator.as_bytes())?;
        }
        write_item(out, item)?;
    }
    Ok(())
}
