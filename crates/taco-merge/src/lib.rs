//! TACO Merge Engine
//!
//! Streaming operations over externally sorted, line-oriented keyed tables.
//!
//! # Core Concepts
//!
//! - [`KeyedStreamCursor`]: Forward-only reader enforcing a key [`Discipline`]
//! - [`GroupingMerge`]: K-way group-by-key over strictly sorted inputs
//! - [`EquiJoin`]: Two-way join of an index table against a map table
//!
//! Only one entry per input is resident at a time, so memory use does not
//! depend on table size. Keys compare byte-wise; inputs must be sorted the
//! same way (`LC_ALL=C sort`).
//!
//! # Example
//!
//! ```rust
//! use taco_merge::{write_records, GroupingMerge, TableFormat};
//!
//! let format = TableFormat::new();
//! let a = "k1 ||| 1 2\nk3 ||| 5\n";
//! let b = "k1 ||| 9\nk2 ||| 4\n";
//!
//! let merge = GroupingMerge::open([(a.as_bytes(), "a"), (b.as_bytes(), "b")], &format).unwrap();
//! let mut out = Vec::new();
//! write_records(merge, &mut out, &format).unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "k1 ||| 0:1 0:2 1:9\nk2 ||| 1:4\nk3 ||| 0:5\n");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod combine;
mod cursor;
mod entry;
mod error;
mod format;
mod join;
mod output;

// Re-exports
pub use combine::{CombinedRecord, GroupingMerge};
pub use cursor::{CursorOptions, Discipline, KeyedStreamCursor};
pub use entry::{IdList, KeyedEntry, LineNumber, Payload};
pub use error::{MergeError, MergeResult};
pub use format::TableFormat;
pub use join::{EquiJoin, JoinedRecord};
pub use output::{write_records, MergeStats, OutputRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
