//! Feature trees
//!
//! A [`FeatureTree`] maps interned feature names to nested sub-trees. It is a
//! selection structure (which features, and which of their sub-features,
//! matter), not a unifiable attribute-value matrix.

use serde::Serialize;
use std::collections::BTreeMap;
use taco_symbol::{Symbol, SymbolError, SymbolTable};

/// Tree of feature symbols
///
/// A node with no children is a leaf. Each symbol appears at most once per
/// node; inserting an existing key replaces its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeatureTree {
    children: BTreeMap<Symbol, FeatureTree>,
}

/// Feature tree with symbols resolved to their names
///
/// Serializes as nested objects, e.g. `{"AGREEMENT":{"NUMBER":{}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamedFeatureTree(pub BTreeMap<String, NamedFeatureTree>);

impl FeatureTree {
    /// Create leaf
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the subtree under `feature`
    ///
    /// Returns the subtree that was replaced, if any.
    pub fn insert(&mut self, feature: Symbol, child: FeatureTree) -> Option<FeatureTree> {
        self.children.insert(feature, child)
    }

    /// Subtree under `feature`
    #[inline]
    #[must_use]
    pub fn child(&self, feature: Symbol) -> Option<&FeatureTree> {
        self.children.get(&feature)
    }

    /// Children ordered by symbol id
    pub fn children(&self) -> impl Iterator<Item = (Symbol, &FeatureTree)> + '_ {
        self.children.iter().map(|(sym, tree)| (*sym, tree))
    }

    /// Returns true if this node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if this node has no children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Longest root-to-leaf path, counted in edges
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Follow a path of features from this node
    #[must_use]
    pub fn get_path(&self, path: &[Symbol]) -> Option<&FeatureTree> {
        path.iter().try_fold(self, |node, sym| node.child(*sym))
    }

    /// Render in bracket notation, e.g. `[AGREEMENT:[NUMBER]]`
    ///
    /// # Errors
    /// Returns [`SymbolError::NotFound`] if a symbol is unknown to `table`
    pub fn render(&self, table: &SymbolTable) -> Result<String, SymbolError> {
        let mut out = String::new();
        self.render_into(table, &mut out)?;
        Ok(out)
    }

    fn render_into(&self, table: &SymbolTable, out: &mut String) -> Result<(), SymbolError> {
        out.push('[');
        for (i, (sym, child)) in self.children.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            out.push_str(&table.resolve(*sym)?);
            if !child.is_leaf() {
                out.push(':');
                child.render_into(table, out)?;
            }
        }
        out.push(']');
        Ok(())
    }

    /// Resolve every symbol to its name
    ///
    /// # Errors
    /// Returns [`SymbolError::NotFound`] if a symbol is unknown to `table`
    pub fn to_named(&self, table: &SymbolTable) -> Result<NamedFeatureTree, SymbolError> {
        self.children
            .iter()
            .map(|(sym, child)| {
                Ok::<_, SymbolError>((table.resolve(*sym)?.to_string(), child.to_named(table)?))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(NamedFeatureTree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreement_tree(table: &SymbolTable) -> FeatureTree {
        let mut inner = FeatureTree::new();
        inner.insert(table.insert("NUMBER"), FeatureTree::new());
        let mut root = FeatureTree::new();
        root.insert(table.insert("AGREEMENT"), inner);
        root
    }

    #[test]
    fn leaf_has_no_children() {
        let tree = FeatureTree::new();
        assert!(tree.is_leaf());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn insert_replaces_existing_feature() {
        let table = SymbolTable::new();
        let case = table.insert("CASE");
        let nom = table.insert("NOM");

        let mut with_child = FeatureTree::new();
        with_child.insert(nom, FeatureTree::new());

        let mut tree = FeatureTree::new();
        assert!(tree.insert(case, with_child.clone()).is_none());
        assert_eq!(tree.insert(case, FeatureTree::new()), Some(with_child));
        assert!(tree.child(case).unwrap().is_leaf());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn depth_and_path() {
        let table = SymbolTable::new();
        let tree = agreement_tree(&table);
        let path = [table.insert("AGREEMENT"), table.insert("NUMBER")];

        assert_eq!(tree.depth(), 2);
        assert!(tree.get_path(&path).unwrap().is_leaf());
        assert!(tree.get_path(&path[1..]).is_none());
    }

    #[test]
    fn render_bracket_notation() {
        let table = SymbolTable::new();
        let tree = agreement_tree(&table);
        assert_eq!(tree.render(&table).unwrap(), "[AGREEMENT:[NUMBER]]");
        assert_eq!(FeatureTree::new().render(&table).unwrap(), "[]");
    }

    #[test]
    fn render_unknown_symbol_fails() {
        let table = SymbolTable::new();
        let mut tree = FeatureTree::new();
        tree.insert(Symbol::from_raw(5), FeatureTree::new());

        assert!(matches!(tree.render(&table), Err(SymbolError::NotFound { id: 5, .. })));
    }

    #[test]
    fn named_tree_resolves_symbols() {
        let table = SymbolTable::new();
        let named = agreement_tree(&table).to_named(&table).unwrap();

        let number = &named.0["AGREEMENT"].0["NUMBER"];
        assert!(number.0.is_empty());
    }
}
