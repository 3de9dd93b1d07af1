//! Keyed entries and their payload formats
//!
//! - Constraint-map lines: `<key> ||| <id> <id> ...` ([`IdList`])
//! - Rule-table-index lines: `<key> ||| <line-number>` ([`LineNumber`])

use crate::format::TableFormat;
use std::str;

/// Payload decoded from the text after the delimiter
pub trait Payload: Sized {
    /// Name used in diagnostics
    const NAME: &'static str;

    /// Decode payload text (already trimmed)
    ///
    /// # Errors
    /// Returns a message describing why `text` is not a valid payload
    fn parse(text: &[u8]) -> Result<Self, String>;
}

/// Whitespace-separated list of integer ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(pub Vec<u64>);

/// Single integer line number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineNumber(pub u64);

fn parse_u64(token: &[u8]) -> Result<u64, String> {
    let text = str::from_utf8(token).map_err(|_| "payload is not valid UTF-8".to_string())?;
    text.parse::<u64>()
        .map_err(|e| format!("invalid integer '{text}': {e}"))
}

impl Payload for IdList {
    const NAME: &'static str = "id list";

    fn parse(text: &[u8]) -> Result<Self, String> {
        text.split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty())
            .map(parse_u64)
            .collect::<Result<Vec<_>, _>>()
            .map(IdList)
    }
}

impl Payload for LineNumber {
    const NAME: &'static str = "line number";

    fn parse(text: &[u8]) -> Result<Self, String> {
        if text.is_empty() {
            return Err("missing line number".to_string());
        }
        parse_u64(text).map(LineNumber)
    }
}

/// One parsed table line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedEntry<P> {
    /// Key bytes, compared byte-wise
    pub key: Vec<u8>,
    /// Decoded payload
    pub payload: P,
    /// 1-based source line number
    pub line: usize,
}

impl<P: Payload> KeyedEntry<P> {
    /// Parse one line
    ///
    /// # Errors
    /// Returns a message if the delimiter is missing or the payload is malformed
    pub fn parse(text: &[u8], line: usize, format: &TableFormat) -> Result<Self, String> {
        let (key, payload) = format
            .split(text)
            .ok_or_else(|| format!("missing delimiter '{}'", format.delimiter))?;
        let payload = P::parse(payload).map_err(|e| format!("bad {}: {e}", P::NAME))?;
        Ok(Self {
            key: key.to_vec(),
            payload,
            line,
        })
    }

    /// Key rendered for diagnostics
    #[must_use]
    pub fn key_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_list_entry() {
        let entry = KeyedEntry::<IdList>::parse(b"k1 ||| 1 2", 3, &TableFormat::new()).unwrap();
        assert_eq!(entry.key, b"k1");
        assert_eq!(entry.payload, IdList(vec![1, 2]));
        assert_eq!(entry.line, 3);
    }

    #[test]
    fn id_list_tolerates_extra_spaces() {
        assert_eq!(IdList::parse(b"7  8\t9").unwrap(), IdList(vec![7, 8, 9]));
        assert_eq!(IdList::parse(b"").unwrap(), IdList::default());
    }

    #[test]
    fn id_list_rejects_words() {
        let err = IdList::parse(b"1 two").unwrap_err();
        assert!(err.contains("'two'"));
    }

    #[test]
    fn parse_line_number_entry() {
        let entry = KeyedEntry::<LineNumber>::parse(b"s ||| 10", 1, &TableFormat::new()).unwrap();
        assert_eq!(entry.payload, LineNumber(10));
    }

    #[test]
    fn line_number_must_be_single_integer() {
        assert!(LineNumber::parse(b"").is_err());
        assert!(LineNumber::parse(b"1 2").is_err());
        assert!(LineNumber::parse(b"-3").is_err());
    }

    #[test]
    fn missing_delimiter_message() {
        let err = KeyedEntry::<IdList>::parse(b"k1 1 2", 1, &TableFormat::new()).unwrap_err();
        assert_eq!(err, "missing delimiter '|||'");
    }

    #[test]
    fn non_utf8_key_is_kept_as_bytes() {
        let entry = KeyedEntry::<IdList>::parse(b"\xff\xfe ||| 1", 1, &TableFormat::new()).unwrap();
        assert_eq!(entry.key, vec![0xff, 0xfe]);
    }
}
