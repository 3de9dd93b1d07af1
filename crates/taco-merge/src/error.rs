//! Error types for the merge engine

use crate::cursor::Discipline;

/// Errors raised while reading or merging keyed tables
///
/// Every variant names the stream it came from so a single diagnostic is
/// enough to locate the problem.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Malformed line
    #[error("{description}: line {line}: {message}")]
    Syntax {
        /// Stream description (usually a file path)
        description: String,
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Key sequence violates the stream's ordering discipline
    #[error(
        "{description}: input not sorted: key at line {line} must be {} key at line {previous_line}",
        .discipline.relation()
    )]
    OrderViolation {
        /// Stream description
        description: String,
        /// Line holding the previous key
        previous_line: usize,
        /// Line holding the offending key
        line: usize,
        /// Discipline that was violated
        discipline: Discipline,
    },

    /// IO error on an input or output stream
    #[error("{description}: io error: {source}")]
    Io {
        /// Stream description
        description: String,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    /// Create syntax error
    pub fn syntax(description: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            description: description.into(),
            line,
            message: message.into(),
        }
    }

    /// Create IO error for stream
    pub fn io_error(description: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            description: description.into(),
            source,
        }
    }

    /// Returns true for ordering failures
    #[inline]
    #[must_use]
    pub fn is_order_violation(&self) -> bool {
        matches!(self, Self::OrderViolation { .. })
    }
}

/// Result type alias for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_violation_display() {
        let err = MergeError::OrderViolation {
            description: "a.txt".into(),
            previous_line: 1,
            line: 2,
            discipline: Discipline::Strict,
        };
        assert_eq!(
            err.to_string(),
            "a.txt: input not sorted: key at line 2 must be greater than key at line 1"
        );
        assert!(err.is_order_violation());
    }

    #[test]
    fn syntax_display() {
        let err = MergeError::syntax("<stdin>", 4, "missing delimiter '|||'");
        assert_eq!(err.to_string(), "<stdin>: line 4: missing delimiter '|||'");
        assert!(!err.is_order_violation());
    }
}
