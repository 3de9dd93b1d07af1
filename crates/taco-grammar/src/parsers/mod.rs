//! Parsers for the annotation mini-languages
//!
//! Provides parsing from text into typed values:
//! - Feature trees in bracket notation
//! - Feature-selection rules and line-oriented tables
//! - Constraint sets

use crate::error::ParseResult;

mod constraint;
mod feature_tree;
mod selection;

pub use constraint::{
    ConstraintSetParser, Lexer as ConstraintLexer, Token as ConstraintToken,
    TokenKind as ConstraintTokenKind,
};
pub use feature_tree::{
    FeatureTreeParser, Lexer as FeatureTreeLexer, Token as FeatureTreeToken,
    TokenKind as FeatureTreeTokenKind,
};
pub use selection::{FeatureSelectionReader, SelectionRuleParser, FIELD_DELIMITER};

/// Parser trait for converting a complete text into a typed value
///
/// Implementations consume the whole input: trailing tokens are a syntax
/// error.
pub trait TextParser {
    /// Value produced on success
    type Output;

    /// Parse `text`
    ///
    /// # Errors
    /// Returns [`ParseError`](crate::ParseError) if `text` does not match the grammar
    fn parse(&self, text: &str) -> ParseResult<Self::Output>;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;
}
