//! Constraint values and sets

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Syntactic form a constraint was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintType {
    /// Bare or quoted string
    String,
    /// `<...>` group
    Angle,
    /// `{...}` group
    Curly,
}

impl ConstraintType {
    /// Token tag that starts this form
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Angle => "LANGLE",
            Self::Curly => "LCURLY",
        }
    }
}

/// Single constraint: its words in source order
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    words: Vec<String>,
}

impl Constraint {
    /// Create constraint from its words
    #[inline]
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Words in source order
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Words joined with single spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Non-empty collection of typed constraints
///
/// Membership is what matters; iteration order is the derived ordering of
/// `(Constraint, ConstraintType)` so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    items: BTreeSet<(Constraint, ConstraintType)>,
}

impl ConstraintSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint; returns false if it was already present
    pub fn insert(&mut self, constraint: Constraint, kind: ConstraintType) -> bool {
        self.items.insert((constraint, kind))
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, constraint: &Constraint, kind: ConstraintType) -> bool {
        self.items.contains(&(constraint.clone(), kind))
    }

    /// Number of distinct constraints
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate constraints
    pub fn iter(&self) -> impl Iterator<Item = (&Constraint, ConstraintType)> + '_ {
        self.items.iter().map(|(c, k)| (c, *k))
    }
}

impl Display for ConstraintSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (constraint, kind)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match kind {
                ConstraintType::String => write_word(f, &constraint.text())?,
                ConstraintType::Angle => write_group(f, "<", constraint, ">")?,
                ConstraintType::Curly => write_group(f, "{", constraint, "}")?,
            }
        }
        Ok(())
    }
}

fn write_group(
    f: &mut Formatter<'_>,
    open: &str,
    constraint: &Constraint,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, word) in constraint.words().iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write_word(f, word)?;
    }
    f.write_str(close)
}

/// Write `word` bare when it lexes back as one STRING, quoted otherwise
fn write_word(f: &mut Formatter<'_>, word: &str) -> fmt::Result {
    let bare = !word.is_empty()
        && !word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '{' | '}' | '"'));
    if bare {
        return f.write_str(word);
    }
    f.write_str("\"")?;
    for c in word.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Constraint {
        Constraint::new(ws.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn insert_deduplicates() {
        let mut set = ConstraintSet::new();
        assert!(set.insert(words(&["a"]), ConstraintType::String));
        assert!(!set.insert(words(&["a"]), ConstraintType::String));
        assert!(set.insert(words(&["a"]), ConstraintType::Angle));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_each_form() {
        let mut set = ConstraintSet::new();
        set.insert(words(&["NP"]), ConstraintType::String);
        set.insert(words(&["DT", "NN"]), ConstraintType::Angle);
        set.insert(words(&["x"]), ConstraintType::Curly);
        set.insert(words(&["two words"]), ConstraintType::String);

        assert_eq!(set.to_string(), "<DT NN> NP \"two words\" {x}");
    }

    #[test]
    fn display_quotes_group_words() {
        let mut set = ConstraintSet::new();
        set.insert(words(&["a b", "c"]), ConstraintType::Angle);
        set.insert(words(&["x}", ""]), ConstraintType::Curly);

        assert_eq!(set.to_string(), r#"<"a b" c> {"x}" ""}"#);
    }
}
