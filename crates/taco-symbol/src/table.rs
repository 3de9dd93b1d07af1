//! Symbol table with append-only interning
//!
//! Provides [`SymbolTable`] and the process-wide vocabulary returned by
//! [`global`].

use crate::symbol::{Symbol, SymbolError};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Bijective mapping between strings and dense ids `0..n-1`
///
/// Ids are handed out in insertion order and never reused. Inserting a
/// string twice returns the id from the first insertion.
///
/// The table is shareable across threads: lookups take a read lock and
/// only a first-time insertion takes the write lock. Callers that need the
/// same ids across runs must still insert in the same order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    inner: RwLock<Interner>,
}

#[derive(Debug, Default)]
struct Interner {
    /// id -> string
    names: Vec<Arc<str>>,

    /// string -> id
    ids: HashMap<Arc<str>, Symbol>,
}

static GLOBAL: Lazy<SymbolTable> = Lazy::new(SymbolTable::new);

/// Process-wide vocabulary, created on first use
///
/// Grows for the lifetime of the process. Tests that need isolation should
/// use their own [`SymbolTable`] instead of clearing this one.
#[inline]
#[must_use]
pub fn global() -> &'static SymbolTable {
    &GLOBAL
}

impl SymbolTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning its id
    ///
    /// Returns the existing id if `name` is already known, otherwise
    /// assigns the next sequential id.
    ///
    /// # Panics
    /// Panics if the table already holds `u32::MAX` strings.
    pub fn insert(&self, name: &str) -> Symbol {
        if let Some(&sym) = self.inner.read().ids.get(name) {
            return sym;
        }

        let mut inner = self.inner.write();
        // Another writer may have won the race between the two locks.
        if let Some(&sym) = inner.ids.get(name) {
            return sym;
        }

        let id = u32::try_from(inner.names.len())
            .ok()
            .filter(|&id| id != Symbol::NONE.as_u32())
            .unwrap_or_else(|| panic!("symbol table exhausted at {} entries", inner.names.len()));
        let sym = Symbol::from_raw(id);
        let name: Arc<str> = Arc::from(name);
        inner.names.push(Arc::clone(&name));
        inner.ids.insert(name, sym);
        sym
    }

    /// Probe for a known string without inserting it
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.inner.read().ids.get(name).copied()
    }

    /// Probe returning [`Symbol::NONE`] for unknown strings
    #[inline]
    #[must_use]
    pub fn lookup_or_none(&self, name: &str) -> Symbol {
        self.lookup(name).unwrap_or(Symbol::NONE)
    }

    /// String interned under `sym`
    ///
    /// # Errors
    /// Returns [`SymbolError::NotFound`] if `sym` is outside the assigned range
    pub fn resolve(&self, sym: Symbol) -> Result<Arc<str>, SymbolError> {
        let inner = self.inner.read();
        inner
            .names
            .get(sym.index())
            .cloned()
            .ok_or(SymbolError::NotFound {
                id: sym.as_u32(),
                len: inner.names.len(),
            })
    }

    /// Check if `name` has been interned
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of interned strings
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().names.len()
    }

    /// Returns true if nothing has been interned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all `(id, string)` pairs in id order
    #[must_use]
    pub fn entries(&self) -> Vec<(Symbol, Arc<str>)> {
        self.inner
            .read()
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (Symbol::from_raw(i as u32), Arc::clone(name)))
            .collect()
    }

    /// Reset to empty
    ///
    /// Previously issued symbols become dangling. Only intended for tests.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.names.clear();
        inner.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_sequential_ids() {
        let table = SymbolTable::new();

        assert_eq!(table.insert("a").index(), 0);
        assert_eq!(table.insert("b").index(), 1);
        assert_eq!(table.insert("c").index(), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn insert_is_idempotent() {
        let table = SymbolTable::new();
        let first = table.insert("NUMBER");
        table.insert("PERSON");

        assert_eq!(table.insert("NUMBER"), first);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn lookup_unknown_is_none() {
        let table = SymbolTable::new();
        table.insert("known");

        assert!(table.lookup("unknown").is_none());
        assert_eq!(table.lookup_or_none("unknown"), Symbol::NONE);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn resolve_known_symbol() {
        let table = SymbolTable::new();
        let sym = table.insert("CASE");

        assert_eq!(&*table.resolve(sym).unwrap(), "CASE");
    }

    #[test]
    fn resolve_out_of_range_fails() {
        let table = SymbolTable::new();
        table.insert("x");

        let err = table.resolve(Symbol::from_raw(1)).unwrap_err();
        assert_eq!(err, SymbolError::NotFound { id: 1, len: 1 });
        assert!(table.resolve(Symbol::NONE).is_err());
    }

    #[test]
    fn empty_string_is_a_symbol() {
        let table = SymbolTable::new();
        let sym = table.insert("");

        assert!(table.contains(""));
        assert_eq!(&*table.resolve(sym).unwrap(), "");
    }

    #[test]
    fn entries_are_in_id_order() {
        let table = SymbolTable::new();
        table.insert("z");
        table.insert("a");

        let names: Vec<_> = table.entries().into_iter().map(|(_, n)| n.to_string()).collect();
        assert_eq!(names, ["z", "a"]);
    }

    #[test]
    fn clear_resets_ids() {
        let table = SymbolTable::new();
        table.insert("a");
        table.insert("b");
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.insert("b").index(), 0);
    }

    #[test]
    fn global_is_shared() {
        let sym = global().insert("taco-symbol::global_is_shared");
        assert_eq!(global().lookup("taco-symbol::global_is_shared"), Some(sym));
    }

    #[test]
    fn concurrent_inserts_agree() {
        let table = Arc::new(SymbolTable::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    (0..100).map(|i| table.insert(&format!("s{i}"))).collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(table.len(), 100);
    }
}
