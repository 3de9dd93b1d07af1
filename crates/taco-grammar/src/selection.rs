//! Feature-selection rules and tables

use crate::error::{ParseError, ParseResult};
use crate::feature_tree::{FeatureTree, NamedFeatureTree};
use serde::Serialize;
use taco_symbol::{SymbolError, SymbolTable};

/// Per-position instruction applied when building output rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureSelectionRule {
    /// Assign a fixed value
    Assign,
    /// Drop the feature
    Drop,
    /// Select the sub-structure described by the tree
    Select(FeatureTree),
}

impl FeatureSelectionRule {
    /// Keyword for the rule kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Drop => "drop",
            Self::Select(_) => "select",
        }
    }

    /// Feature tree of a `Select` rule
    #[must_use]
    pub fn tree(&self) -> Option<&FeatureTree> {
        match self {
            Self::Select(tree) => Some(tree),
            Self::Assign | Self::Drop => None,
        }
    }

    /// Rule text as it appears in a table line
    ///
    /// # Errors
    /// Returns [`SymbolError::NotFound`] if the tree holds symbols unknown to `table`
    pub fn render(&self, table: &SymbolTable) -> Result<String, SymbolError> {
        match self {
            Self::Select(tree) => tree.render(table),
            other => Ok(other.kind().to_string()),
        }
    }
}

/// Ordered `(index, rule)` entries, one per table line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSelectionTable {
    entries: Vec<(usize, FeatureSelectionRule)>,
}

/// Serializable view of one table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedSelectionEntry {
    /// Rule index
    pub index: usize,
    /// `assign`, `drop` or `select`
    pub rule: &'static str,
    /// Selected features, present for `select` rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<NamedFeatureTree>,
}

impl FeatureSelectionTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, index: usize, rule: FeatureSelectionRule) {
        self.entries.push((index, rule));
    }

    /// Entries in file order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(usize, FeatureSelectionRule)] {
        &self.entries
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rule of the first entry carrying `index`
    #[must_use]
    pub fn rule(&self, index: usize) -> Option<&FeatureSelectionRule> {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, rule)| rule)
    }

    /// Check that indices run `0..n-1` in file order
    ///
    /// # Errors
    /// Returns [`ParseError::IndexGap`] at the first out-of-place index
    pub fn validate_contiguous(&self) -> ParseResult<()> {
        validate_contiguous(&self.entries)
    }

    /// Render as table text, one `<index> ||| <rule>` line per entry
    ///
    /// # Errors
    /// Returns [`SymbolError::NotFound`] if a tree holds symbols unknown to `table`
    pub fn render(&self, table: &SymbolTable, delimiter: &str) -> Result<String, SymbolError> {
        let mut out = String::new();
        for (index, rule) in &self.entries {
            out.push_str(&format!("{index} {delimiter} {}\n", rule.render(table)?));
        }
        Ok(out)
    }

    /// Resolve every entry for serialization
    ///
    /// # Errors
    /// Returns [`SymbolError::NotFound`] if a tree holds symbols unknown to `table`
    pub fn to_named(&self, table: &SymbolTable) -> Result<Vec<NamedSelectionEntry>, SymbolError> {
        self.entries
            .iter()
            .map(|(index, rule)| {
                Ok::<_, SymbolError>(NamedSelectionEntry {
                    index: *index,
                    rule: rule.kind(),
                    features: rule.tree().map(|t| t.to_named(table)).transpose()?,
                })
            })
            .collect()
    }
}

impl FromIterator<(usize, FeatureSelectionRule)> for FeatureSelectionTable {
    fn from_iter<I: IntoIterator<Item = (usize, FeatureSelectionRule)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Check that entry indices run `0..n-1` in order
///
/// # Errors
/// Returns [`ParseError::IndexGap`] at the first out-of-place index
pub fn validate_contiguous(entries: &[(usize, FeatureSelectionRule)]) -> ParseResult<()> {
    for (position, (index, _)) in entries.iter().enumerate() {
        if *index != position {
            return Err(ParseError::IndexGap {
                position,
                expected: position,
                found: *index,
            });
        }
    }
    Ok(())
}
