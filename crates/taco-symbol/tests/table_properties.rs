use proptest::prelude::*;
use std::collections::HashSet;
use taco_symbol::{Symbol, SymbolError, SymbolTable};

proptest! {
    #[test]
    fn prop_insert_is_stable(names in proptest::collection::vec("[a-zA-Z_]{0,8}", 1..40)) {
        let table = SymbolTable::new();
        let first: Vec<Symbol> = names.iter().map(|n| table.insert(n)).collect();
        let second: Vec<Symbol> = names.iter().map(|n| table.insert(n)).collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_distinct_strings_get_distinct_ids(names in proptest::collection::vec("[a-z]{1,6}", 1..40)) {
        let table = SymbolTable::new();
        for a in &names {
            for b in &names {
                let (sa, sb) = (table.insert(a), table.insert(b));
                prop_assert_eq!(a == b, sa == sb);
            }
        }
    }

    #[test]
    fn prop_ids_are_dense(names in proptest::collection::vec("[a-z]{1,4}", 0..60)) {
        let table = SymbolTable::new();
        for name in &names {
            table.insert(name);
        }

        let distinct: HashSet<_> = names.iter().collect();
        let n = distinct.len();
        prop_assert_eq!(table.len(), n);

        let mut ids: Vec<usize> = distinct.iter().map(|name| table.lookup(name).unwrap().index()).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..n).collect::<Vec<_>>());

        // The first unassigned id is never resolvable
        let missing = Symbol::from_raw(n as u32);
        prop_assert_eq!(table.resolve(missing), Err(SymbolError::NotFound { id: n as u32, len: n }));
    }
}

#[test]
fn resolve_every_assigned_id() {
    let table = SymbolTable::new();
    let words = ["AGREEMENT", "NUMBER", "PERSON", "GENDER", "CASE"];
    for w in words {
        table.insert(w);
    }

    for (sym, name) in table.entries() {
        assert_eq!(table.resolve(sym).unwrap(), name);
        assert_eq!(table.lookup(&name), Some(sym));
    }
}
