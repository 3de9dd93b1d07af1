//! Constraint-set grammar
//!
//! ```text
//! Set        -> Constraint Constraint*          -- while lookahead is STRING, '<' or '{'
//! Constraint -> STRING
//!             | '<' STRING+ '>'
//!             | '{' STRING+ '}'
//! ```
//!
//! A STRING is either a bare word (no whitespace, no `<>{}"`) or a
//! double-quoted string in which `\"` and `\\` escape themselves.

use super::TextParser;
use crate::constraint::{Constraint, ConstraintSet, ConstraintType};
use crate::error::{ParseError, ParseResult};

/// Token kinds of the constraint language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word or quoted string
    String,
    /// `<`
    LAngle,
    /// `>`
    RAngle,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// End of input
    End,
}

impl TokenKind {
    /// Name used in diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::LAngle => "LANGLE",
            Self::RAngle => "RANGLE",
            Self::LCurly => "LCURLY",
            Self::RCurly => "RCURLY",
            Self::End => "end of input",
        }
    }

    /// Returns true for tokens that can start a constraint
    #[must_use]
    pub const fn starts_constraint(self) -> bool {
        matches!(self, Self::String | Self::LAngle | Self::LCurly)
    }
}

const CONSTRAINT_START: &str = "STRING, LANGLE or LCURLY";

/// Token with its decoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Decoded string value (empty for punctuation)
    pub value: String,
    /// Byte offset into the input
    pub offset: usize,
}

/// Tokenizer for constraint text
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '<' | '>' | '{' | '}' | '"')
}

impl<'a> Lexer<'a> {
    /// Create lexer over `src`
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Next token
    ///
    /// # Errors
    /// Returns [`ParseError::Syntax`] for an unterminated quoted string
    pub fn next_token(&mut self) -> ParseResult<Token> {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();

        let start = self.pos;
        let Some(c) = self.src[start..].chars().next() else {
            return Ok(self.punct(TokenKind::End, start, 0));
        };

        match c {
            '<' => Ok(self.punct(TokenKind::LAngle, start, 1)),
            '>' => Ok(self.punct(TokenKind::RAngle, start, 1)),
            '{' => Ok(self.punct(TokenKind::LCurly, start, 1)),
            '}' => Ok(self.punct(TokenKind::RCurly, start, 1)),
            '"' => self.quoted(start),
            _ => {
                let len = self.src[start..]
                    .find(|c: char| c.is_whitespace() || is_delimiter(c))
                    .unwrap_or(self.src.len() - start);
                self.pos = start + len;
                Ok(Token {
                    kind: TokenKind::String,
                    value: self.src[start..self.pos].to_string(),
                    offset: start,
                })
            }
        }
    }

    fn punct(&mut self, kind: TokenKind, start: usize, len: usize) -> Token {
        self.pos = start + len;
        Token {
            kind,
            value: String::new(),
            offset: start,
        }
    }

    fn quoted(&mut self, start: usize) -> ParseResult<Token> {
        let mut value = String::new();
        let mut chars = self.src[start + 1..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos = start + 1 + i + 1;
                    return Ok(Token {
                        kind: TokenKind::String,
                        value,
                        offset: start,
                    });
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                _ => value.push(c),
            }
        }
        Err(ParseError::syntax("closing '\"'", TokenKind::End.name(), self.src.len()))
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Token,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(src);
        let lookahead = lexer.next_token()?;
        Ok(Self { lexer, lookahead })
    }

    fn expect(&mut self, expected: TokenKind) -> ParseResult<String> {
        if self.lookahead.kind != expected {
            return Err(ParseError::syntax(
                expected.name(),
                self.lookahead.kind.name(),
                self.lookahead.offset,
            ));
        }
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.lookahead, next).value)
    }

    fn constraint_set(&mut self) -> ParseResult<ConstraintSet> {
        let mut set = ConstraintSet::new();
        loop {
            let (constraint, kind) = self.constraint()?;
            set.insert(constraint, kind);
            if !self.lookahead.kind.starts_constraint() {
                return Ok(set);
            }
        }
    }

    fn constraint(&mut self) -> ParseResult<(Constraint, ConstraintType)> {
        match self.lookahead.kind {
            TokenKind::String => {
                let word = self.expect(TokenKind::String)?;
                Ok((Constraint::new(vec![word]), ConstraintType::String))
            }
            TokenKind::LAngle => {
                self.expect(TokenKind::LAngle)?;
                let words = self.words()?;
                self.expect(TokenKind::RAngle)?;
                Ok((Constraint::new(words), ConstraintType::Angle))
            }
            TokenKind::LCurly => {
                self.expect(TokenKind::LCurly)?;
                let words = self.words()?;
                self.expect(TokenKind::RCurly)?;
                Ok((Constraint::new(words), ConstraintType::Curly))
            }
            other => Err(ParseError::syntax(
                CONSTRAINT_START,
                other.name(),
                self.lookahead.offset,
            )),
        }
    }

    fn words(&mut self) -> ParseResult<Vec<String>> {
        let mut words = vec![self.expect(TokenKind::String)?];
        while self.lookahead.kind == TokenKind::String {
            words.push(self.expect(TokenKind::String)?);
        }
        Ok(words)
    }
}

/// Parser for whitespace-separated constraint sets
///
/// # Example
/// ```
/// use taco_grammar::parsers::{ConstraintSetParser, TextParser};
///
/// let set = ConstraintSetParser.parse("NP <DT NN> {sg pl}").unwrap();
/// assert_eq!(set.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintSetParser;

impl TextParser for ConstraintSetParser {
    type Output = ConstraintSet;

    fn parse(&self, text: &str) -> ParseResult<ConstraintSet> {
        let mut parser = Parser::new(text)?;
        let set = parser.constraint_set()?;
        parser.expect(TokenKind::End)?;
        Ok(set)
    }

    fn name(&self) -> &'static str {
        "constraint-set"
    }
}
