//! TACO Grammar
//!
//! Recursive-descent parsers for the annotation mini-languages used when
//! building constrained grammar rules.
//!
//! # Languages
//!
//! - **Feature trees**: `[AGREEMENT:[NUMBER];CASE]`
//! - **Feature-selection tables**: `<index> ||| assign | drop | <feature-tree>`
//! - **Constraint sets**: `NP <DT NN> {sg pl}`
//!
//! # Architecture
//!
//! ```text
//! text → Lexer → predictive Parser → FeatureTree / FeatureSelectionRule / ConstraintSet
//!                      ↓
//!                 SymbolTable (feature names interned as consumed)
//! ```
//!
//! # Example
//!
//! ```rust
//! use taco_grammar::parsers::{FeatureSelectionReader, TextParser};
//! use taco_grammar::FeatureSelectionRule;
//! use taco_symbol::SymbolTable;
//!
//! let symbols = SymbolTable::new();
//! let text = "0 ||| assign\n1 ||| [AGREEMENT:[NUMBER]]\n";
//!
//! let table = FeatureSelectionReader::new(text.as_bytes(), &symbols).read_table().unwrap();
//! table.validate_contiguous().unwrap();
//! assert!(matches!(table.rule(1), Some(FeatureSelectionRule::Select(_))));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod constraint;
pub mod error;
pub mod feature_tree;
pub mod parsers;
pub mod selection;

// Re-exports for convenience
pub use constraint::{Constraint, ConstraintSet, ConstraintType};
pub use error::{ParseError, ParseResult};
pub use feature_tree::{FeatureTree, NamedFeatureTree};
pub use selection::{
    validate_contiguous, FeatureSelectionRule, FeatureSelectionTable, NamedSelectionEntry,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the grammar parsers
    pub use crate::error::{ParseError, ParseResult};
    pub use crate::parsers::{
        ConstraintSetParser, FeatureSelectionReader, FeatureTreeParser, SelectionRuleParser,
        TextParser,
    };
    pub use crate::{ConstraintSet, FeatureSelectionRule, FeatureSelectionTable, FeatureTree};
}
