//! Symbol - Interned string identifiers
//!
//! Provides [`Symbol`], the dense integer handle handed out by a
//! [`SymbolTable`](crate::SymbolTable).

use std::fmt::{self, Display, Formatter};

/// Identifier of an interned string
///
/// Symbols are assigned sequentially from `0` by the table that interned
/// them. Equality and ordering are those of the underlying integer, so two
/// symbols are only meaningfully comparable when they come from the same
/// table.
///
/// # Example
/// ```
/// use taco_symbol::SymbolTable;
///
/// let table = SymbolTable::new();
/// let a = table.insert("AGREEMENT");
/// let b = table.insert("NUMBER");
///
/// assert!(a < b);
/// assert_eq!(a.index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Sentinel returned by non-failing probes for unknown strings
    pub const NONE: Symbol = Symbol(u32::MAX);

    /// Wrap a raw identifier
    ///
    /// The result is not checked against any table; resolving it may fail
    /// with [`SymbolError::NotFound`].
    #[inline]
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Raw integer value
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Position in the table's insertion order
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the [`Symbol::NONE`] sentinel
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors for symbol operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    /// Identifier outside the assigned range
    #[error("symbol id {id} not found (table holds {len} symbols)")]
    NotFound {
        /// Requested identifier
        id: u32,
        /// Number of symbols assigned when the lookup failed
        len: usize,
    },

    /// Malformed label-sequence key
    #[error("invalid label key '{key}': {reason}")]
    InvalidKey {
        /// Offending key text
        key: String,
        /// What was wrong with it
        reason: String,
    },
}
