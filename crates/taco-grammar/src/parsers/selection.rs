//! Feature-selection table reader
//!
//! Each line has the shape `<index> ||| <rule>`, where `<rule>` is `assign`,
//! `drop`, or a bracket-notation feature tree.

use super::{FeatureTreeParser, TextParser};
use crate::error::{ParseError, ParseResult};
use crate::selection::{FeatureSelectionRule, FeatureSelectionTable};
use std::io::{BufRead, Lines};
use taco_symbol::SymbolTable;

/// Field delimiter of table lines
pub const FIELD_DELIMITER: &str = "|||";

/// Parser for the rule text of one table line
#[derive(Debug, Clone, Copy)]
pub struct SelectionRuleParser<'t> {
    trees: FeatureTreeParser<'t>,
}

impl<'t> SelectionRuleParser<'t> {
    /// Create parser interning feature names into `table`
    #[inline]
    #[must_use]
    pub fn new(table: &'t SymbolTable) -> Self {
        Self {
            trees: FeatureTreeParser::new(table),
        }
    }
}

impl TextParser for SelectionRuleParser<'_> {
    type Output = FeatureSelectionRule;

    fn parse(&self, text: &str) -> ParseResult<FeatureSelectionRule> {
        match text.trim() {
            "assign" => Ok(FeatureSelectionRule::Assign),
            "drop" => Ok(FeatureSelectionRule::Drop),
            other => self.trees.parse(other).map(FeatureSelectionRule::Select),
        }
    }

    fn name(&self) -> &'static str {
        "feature-selection-rule"
    }
}

/// Lazy, forward-only reader of `(index, rule)` entries
///
/// Reading stops at end of input or at the first blank line. The first error
/// ends the sequence: after yielding an `Err`, the reader yields `None`.
///
/// # Example
/// ```
/// use taco_grammar::parsers::FeatureSelectionReader;
/// use taco_grammar::FeatureSelectionRule;
/// use taco_symbol::SymbolTable;
///
/// let table = SymbolTable::new();
/// let text = "0 ||| assign\n1 ||| drop\n";
/// let entries: Vec<_> = FeatureSelectionReader::new(text.as_bytes(), &table)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(entries, vec![(0, FeatureSelectionRule::Assign), (1, FeatureSelectionRule::Drop)]);
/// ```
#[derive(Debug)]
pub struct FeatureSelectionReader<'t, R> {
    lines: Lines<R>,
    rules: SelectionRuleParser<'t>,
    delimiter: String,
    line: usize,
    finished: bool,
}

impl<'t, R: BufRead> FeatureSelectionReader<'t, R> {
    /// Create reader interning feature names into `table`
    #[must_use]
    pub fn new(reader: R, table: &'t SymbolTable) -> Self {
        Self {
            lines: reader.lines(),
            rules: SelectionRuleParser::new(table),
            delimiter: FIELD_DELIMITER.to_string(),
            line: 0,
            finished: false,
        }
    }

    /// Use a field delimiter other than `|||`
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Number of lines consumed so far
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read every remaining entry
    ///
    /// # Errors
    /// Returns the first line-level error encountered
    pub fn read_table(self) -> ParseResult<FeatureSelectionTable> {
        self.collect()
    }

    fn parse_line(&self, text: &str) -> ParseResult<(usize, FeatureSelectionRule)> {
        let Some((index_text, rule_text)) = text.split_once(self.delimiter.as_str()) else {
            return Err(ParseError::MissingDelimiter {
                line: self.line,
                delimiter: self.delimiter.clone(),
            });
        };

        let index_text = index_text.trim();
        let index = index_text
            .parse::<usize>()
            .map_err(|source| ParseError::InvalidIndex {
                line: self.line,
                text: index_text.to_string(),
                source,
            })?;

        let rule = self
            .rules
            .parse(rule_text)
            .map_err(|e| ParseError::in_line(self.line, e))?;

        Ok((index, rule))
    }
}

impl<R: BufRead> Iterator for FeatureSelectionReader<'_, R> {
    type Item = ParseResult<(usize, FeatureSelectionRule)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let text = match self.lines.next() {
            Some(Ok(text)) => text,
            Some(Err(source)) => {
                self.finished = true;
                return Some(Err(ParseError::Io {
                    line: self.line + 1,
                    source,
                }));
            }
            None => {
                self.finished = true;
                return None;
            }
        };

        self.line += 1;
        if text.trim().is_empty() {
            tracing::debug!(line = self.line, "blank line ends selection table");
            self.finished = true;
            return None;
        }

        let entry = self.parse_line(&text);
        if entry.is_err() {
            self.finished = true;
        }
        tracing::trace!(line = self.line, ok = entry.is_ok(), "selection entry");
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> (SymbolTable, Vec<ParseResult<(usize, FeatureSelectionRule)>>) {
        let table = SymbolTable::new();
        let entries = FeatureSelectionReader::new(text.as_bytes(), &table).collect();
        (table, entries)
    }

    #[test]
    fn rule_keywords_are_trimmed() {
        let table = SymbolTable::new();
        let rules = SelectionRuleParser::new(&table);
        assert_eq!(rules.parse("  assign ").unwrap(), FeatureSelectionRule::Assign);
        assert_eq!(rules.parse("drop").unwrap(), FeatureSelectionRule::Drop);
        assert!(matches!(rules.parse("[A]").unwrap(), FeatureSelectionRule::Select(_)));
    }

    #[test]
    fn keyword_is_case_sensitive() {
        let table = SymbolTable::new();
        assert!(SelectionRuleParser::new(&table).parse("Assign").is_err());
    }

    #[test]
    fn three_line_table() {
        let (table, entries) = read("0 ||| assign\n1 ||| drop\n2 ||| [AGREEMENT:[NUMBER]]\n");
        let entries: Vec<_> = entries.into_iter().map(Result::unwrap).collect();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (0, FeatureSelectionRule::Assign));
        assert_eq!(entries[1], (1, FeatureSelectionRule::Drop));
        let tree = entries[2].1.tree().unwrap();
        assert_eq!(tree.render(&table).unwrap(), "[AGREEMENT:[NUMBER]]");
    }

    #[test]
    fn blank_line_ends_the_table() {
        let (_, entries) = read("0 ||| drop\n   \n1 ||| drop\n");
        assert_eq!(entries.len(), 1);

        let (_, entries) = read("\n0 ||| drop\n");
        assert!(entries.is_empty());
    }

    #[test]
    fn missing_delimiter_stops_reading() {
        let (_, entries) = read("0 ||| drop\n1 drop\n2 ||| drop\n");
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            entries[1],
            Err(ParseError::MissingDelimiter { line: 2, .. })
        ));
    }

    #[test]
    fn bad_index() {
        let (_, entries) = read("x ||| drop\n");
        assert!(matches!(
            &entries[0],
            Err(ParseError::InvalidIndex { line: 1, text, .. }) if text == "x"
        ));

        let (_, entries) = read("-1 ||| drop\n");
        assert!(matches!(entries[0], Err(ParseError::InvalidIndex { .. })));
    }

    #[test]
    fn bad_tree_reports_line() {
        let (_, entries) = read("0 ||| drop\n1 ||| [AGREEMENT\n");
        let err = entries[1].as_ref().unwrap_err();
        assert!(matches!(err, ParseError::InLine { line: 2, .. }));
        assert!(err.is_syntax());
    }

    #[test]
    fn splits_on_first_delimiter() {
        let (_, entries) = read("0 ||| [A] ||| x\n");
        assert!(entries[0].is_err());
    }

    #[test]
    fn custom_delimiter() {
        let table = SymbolTable::new();
        let entries: Vec<_> = FeatureSelectionReader::new("0\tassign\n".as_bytes(), &table)
            .with_delimiter("\t")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries, vec![(0, FeatureSelectionRule::Assign)]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let (_, entries) = read("");
        assert!(entries.is_empty());
    }
}
