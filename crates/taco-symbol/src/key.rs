//! Label-sequence keys
//!
//! Constraint-map tables are keyed by the target-side label sequence of a
//! grammar rule, written as symbol ids joined with `-` (e.g. `3-17-4`).

use crate::symbol::{Symbol, SymbolError};

/// Separator between symbol ids in a label key
pub const LABEL_SEPARATOR: char = '-';

/// Render a symbol sequence as a table key
///
/// An empty sequence renders as the empty string.
#[must_use]
pub fn encode_label_sequence(symbols: &[Symbol]) -> String {
    let mut key = String::new();
    for (i, sym) in symbols.iter().enumerate() {
        if i > 0 {
            key.push(LABEL_SEPARATOR);
        }
        key.push_str(&sym.as_u32().to_string());
    }
    key
}

/// Parse a table key back into its symbol sequence
///
/// # Errors
/// Returns [`SymbolError::InvalidKey`] if any component is not a decimal id
pub fn decode_label_sequence(key: &str) -> Result<Vec<Symbol>, SymbolError> {
    if key.is_empty() {
        return Ok(Vec::new());
    }

    key.split(LABEL_SEPARATOR)
        .map(|part| {
            part.parse::<u32>()
                .map(Symbol::from_raw)
                .map_err(|e| SymbolError::InvalidKey {
                    key: key.to_string(),
                    reason: format!("component '{part}': {e}"),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolTable;

    #[test]
    fn encode_joins_ids() {
        let syms = [Symbol::from_raw(3), Symbol::from_raw(17), Symbol::from_raw(4)];
        assert_eq!(encode_label_sequence(&syms), "3-17-4");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode_label_sequence(&[]), "");
        assert!(decode_label_sequence("").unwrap().is_empty());
    }

    #[test]
    fn decode_interned_labels() {
        let table = SymbolTable::new();
        let labels = ["S", "NP", "VP"].map(|l| table.insert(l));

        let key = encode_label_sequence(&labels);
        assert_eq!(decode_label_sequence(&key).unwrap(), labels);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_label_sequence("1--2"),
            Err(SymbolError::InvalidKey { .. })
        ));
        assert!(decode_label_sequence("NP-VP").is_err());
    }
}
