//! Error types for the grammar parsers
//!
//! Provides error handling for:
//! - Token-level syntax errors (feature trees, constraint sets)
//! - Line-level errors in feature-selection tables
//! - Index continuity checks

use std::num::ParseIntError;

/// Errors raised while parsing grammar annotations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Current token does not fit the grammar
    #[error("syntax error at byte offset {position}: expected {expected}, found {found}")]
    Syntax {
        /// Token kind (or kinds) the parser could accept here
        expected: &'static str,
        /// Token kind actually seen
        found: &'static str,
        /// Byte offset of the offending token
        position: usize,
    },

    /// Table line without the field delimiter
    #[error("line {line}: missing delimiter '{delimiter}'")]
    MissingDelimiter {
        /// 1-based line number
        line: usize,
        /// Delimiter that was searched for
        delimiter: String,
    },

    /// Rule index is not a non-negative integer
    #[error("line {line}: invalid rule index '{text}': {source}")]
    InvalidIndex {
        /// 1-based line number
        line: usize,
        /// Text found in the index field
        text: String,
        /// Underlying integer parse failure
        #[source]
        source: ParseIntError,
    },

    /// Syntax error inside the rule text of a table line
    #[error("line {line}: {source}")]
    InLine {
        /// 1-based line number
        line: usize,
        /// Error raised by the rule-text parser
        #[source]
        source: Box<ParseError>,
    },

    /// Table indices are not `0..n-1` in file order
    #[error("entry {position} has index {found}, expected {expected}")]
    IndexGap {
        /// Position of the entry in the table
        position: usize,
        /// Index required at this position
        expected: usize,
        /// Index actually present
        found: usize,
    },

    /// IO error while reading a table
    #[error("io error reading line {line}: {source}")]
    Io {
        /// 1-based number of the line being read
        line: usize,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create syntax error
    #[inline]
    #[must_use]
    pub fn syntax(expected: &'static str, found: &'static str, position: usize) -> Self {
        Self::Syntax {
            expected,
            found,
            position,
        }
    }

    /// Attach a line number to a rule-text error
    #[inline]
    #[must_use]
    pub fn in_line(line: usize, source: ParseError) -> Self {
        Self::InLine {
            line,
            source: Box::new(source),
        }
    }

    /// Returns true for token-level and line-shape errors
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        match self {
            Self::Syntax { .. } | Self::MissingDelimiter { .. } | Self::InvalidIndex { .. } => true,
            Self::InLine { source, .. } => source.is_syntax(),
            Self::IndexGap { .. } | Self::Io { .. } => false,
        }
    }
}

/// Result type alias for grammar operations
pub type ParseResult<T> = Result<T, ParseError>;
