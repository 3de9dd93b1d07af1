//! Feature-tree grammar
//!
//! ```text
//! FT            -> '[' EntryList ']'
//! EntryList     -> Entry EntryListTail | ε
//! EntryListTail -> ';' EntryList | ε
//! Entry         -> WORD EntryTail
//! EntryTail     -> ':' FT | ε
//! ```
//!
//! Parsing interns every feature name into the supplied [`SymbolTable`].

use super::TextParser;
use crate::error::{ParseError, ParseResult};
use crate::feature_tree::FeatureTree;
use taco_symbol::SymbolTable;

/// Token kinds of the feature-tree language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// Maximal run of other non-whitespace characters
    Word,
    /// End of input
    End,
}

impl TokenKind {
    /// Name used in diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Word => "WORD",
            Self::End => "end of input",
        }
    }
}

/// Token with its source slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind
    pub kind: TokenKind,
    /// Source text of the token (empty at end of input)
    pub text: &'a str,
    /// Byte offset into the input
    pub offset: usize,
}

/// Tokenizer for bracket notation
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | ':' | ';')
}

impl<'a> Lexer<'a> {
    /// Create lexer over `src`
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Next token; returns [`TokenKind::End`] forever once input is exhausted
    pub fn next_token(&mut self) -> Token<'a> {
        let rest = &self.src[self.pos..];
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;

        let start = self.pos;
        let Some(c) = self.src[start..].chars().next() else {
            return Token {
                kind: TokenKind::End,
                text: "",
                offset: start,
            };
        };

        let kind = match c {
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            _ => TokenKind::Word,
        };

        let len = if kind == TokenKind::Word {
            self.src[start..]
                .find(|c: char| c.is_whitespace() || is_special(c))
                .unwrap_or(self.src.len() - start)
        } else {
            c.len_utf8()
        };

        self.pos = start + len;
        Token {
            kind,
            text: &self.src[start..self.pos],
            offset: start,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != TokenKind::End).then_some(token)
    }
}

/// Predictive parser state: one token of lookahead
struct Parser<'a, 't> {
    lexer: Lexer<'a>,
    lookahead: Token<'a>,
    table: &'t SymbolTable,
}

impl<'a, 't> Parser<'a, 't> {
    fn new(src: &'a str, table: &'t SymbolTable) -> Self {
        let mut lexer = Lexer::new(src);
        let lookahead = lexer.next_token();
        Self {
            lexer,
            lookahead,
            table,
        }
    }

    /// Consume the lookahead if it has kind `expected`, returning its text
    fn expect(&mut self, expected: TokenKind) -> ParseResult<&'a str> {
        if self.lookahead.kind != expected {
            return Err(ParseError::syntax(
                expected.name(),
                self.lookahead.kind.name(),
                self.lookahead.offset,
            ));
        }
        let text = self.lookahead.text;
        self.lookahead = self.lexer.next_token();
        Ok(text)
    }

    fn feature_tree(&mut self) -> ParseResult<FeatureTree> {
        self.expect(TokenKind::LBracket)?;
        let mut tree = FeatureTree::new();
        self.entry_list(&mut tree)?;
        self.expect(TokenKind::RBracket)?;
        Ok(tree)
    }

    // EntryList and EntryListTail, unrolled into a loop.
    fn entry_list(&mut self, tree: &mut FeatureTree) -> ParseResult<()> {
        while self.lookahead.kind == TokenKind::Word {
            self.entry(tree)?;
            if self.lookahead.kind != TokenKind::Semicolon {
                break;
            }
            self.expect(TokenKind::Semicolon)?;
        }
        Ok(())
    }

    fn entry(&mut self, tree: &mut FeatureTree) -> ParseResult<()> {
        let word = self.expect(TokenKind::Word)?;
        let feature = self.table.insert(word);

        let child = if self.lookahead.kind == TokenKind::Colon {
            self.expect(TokenKind::Colon)?;
            self.feature_tree()?
        } else {
            FeatureTree::new()
        };

        if tree.insert(feature, child).is_some() {
            tracing::warn!(feature = word, "feature repeated at one level; keeping the later value");
        }
        Ok(())
    }
}

/// Parser for bracket-notation feature trees
///
/// # Example
/// ```
/// use taco_grammar::parsers::{FeatureTreeParser, TextParser};
/// use taco_symbol::SymbolTable;
///
/// let table = SymbolTable::new();
/// let tree = FeatureTreeParser::new(&table).parse("[AGREEMENT:[NUMBER]]").unwrap();
///
/// let agreement = table.lookup("AGREEMENT").unwrap();
/// assert_eq!(tree.child(agreement).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FeatureTreeParser<'t> {
    table: &'t SymbolTable,
}

impl<'t> FeatureTreeParser<'t> {
    /// Create parser interning into `table`
    #[inline]
    #[must_use]
    pub fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    /// Create parser interning into the process-wide vocabulary
    #[inline]
    #[must_use]
    pub fn global() -> FeatureTreeParser<'static> {
        FeatureTreeParser::new(taco_symbol::global())
    }

    /// Symbol table this parser interns into
    #[inline]
    #[must_use]
    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }
}

impl TextParser for FeatureTreeParser<'_> {
    type Output = FeatureTree;

    fn parse(&self, text: &str) -> ParseResult<FeatureTree> {
        let mut parser = Parser::new(text, self.table);
        let tree = parser.feature_tree()?;
        parser.expect(TokenKind::End)?;
        Ok(tree)
    }

    fn name(&self) -> &'static str {
        "feature-tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).map(|t| t.kind).collect()
    }

    fn parse(table: &SymbolTable, src: &str) -> ParseResult<FeatureTree> {
        FeatureTreeParser::new(table).parse(src)
    }

    #[test]
    fn lexer_splits_specials() {
        use TokenKind::*;
        assert_eq!(
            kinds("[A:[B];C]"),
            vec![LBracket, Word, Colon, LBracket, Word, RBracket, Semicolon, Word, RBracket]
        );
    }

    #[test]
    fn lexer_skips_whitespace() {
        let tokens: Vec<_> = Lexer::new("  [\tfoo-bar  ]").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "foo-bar");
        assert_eq!(tokens[1].offset, 4);
    }

    #[test]
    fn lexer_end_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Word);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
    }

    #[test]
    fn parse_nested() {
        let table = SymbolTable::new();
        let tree = parse(&table, "[AGREEMENT:[NUMBER]]").unwrap();

        let agreement = table.lookup("AGREEMENT").unwrap();
        let number = table.lookup("NUMBER").unwrap();
        assert_eq!(tree.len(), 1);
        let inner = tree.child(agreement).unwrap();
        assert_eq!(inner.len(), 1);
        assert!(inner.child(number).unwrap().is_leaf());
    }

    #[test]
    fn parse_empty_and_trailing_semicolon() {
        let table = SymbolTable::new();
        assert!(parse(&table, "[]").unwrap().is_leaf());
        assert_eq!(parse(&table, "[A;B;]").unwrap().len(), 2);
    }

    #[test]
    fn parse_siblings_with_spaces() {
        let table = SymbolTable::new();
        let tree = parse(&table, " [ CASE ; AGR : [ NUM ; PER ] ] ").unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.render(&table).unwrap(), "[CASE;AGR:[NUM;PER]]");
    }

    #[test]
    fn parse_interns_features() {
        let table = SymbolTable::new();
        parse(&table, "[X:[Y];Z]").unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.contains("Y"));
    }

    #[test]
    fn repeated_feature_keeps_last() {
        let table = SymbolTable::new();
        let tree = parse(&table, "[A:[B];A]").unwrap();
        let a = table.lookup("A").unwrap();

        assert_eq!(tree.len(), 1);
        assert!(tree.child(a).unwrap().is_leaf());
    }

    #[test]
    fn unterminated_fails() {
        let table = SymbolTable::new();
        let err = parse(&table, "[AGREEMENT").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                expected: "']'",
                found: "end of input",
                position: 10
            }
        ));
    }

    #[test]
    fn missing_open_bracket_fails() {
        let table = SymbolTable::new();
        assert!(matches!(
            parse(&table, "A]"),
            Err(ParseError::Syntax { expected: "'['", found: "WORD", .. })
        ));
    }

    #[test]
    fn colon_requires_tree() {
        let table = SymbolTable::new();
        assert!(parse(&table, "[A:B]").is_err());
        assert!(parse(&table, "[A:]").is_err());
    }

    #[test]
    fn trailing_input_fails() {
        let table = SymbolTable::new();
        assert!(matches!(
            parse(&table, "[A] B"),
            Err(ParseError::Syntax { expected: "end of input", found: "WORD", position: 4 })
        ));
    }

    #[test]
    fn leading_semicolon_fails() {
        let table = SymbolTable::new();
        assert!(parse(&table, "[;A]").is_err());
    }
}
