//! Compiled query units and the token matching contract.
//!
//! A stored token has the form `field:word` (or `field:key:word` for key-value
//! fields). A [`Pattern`] is satisfied by a token when the token's field
//! segment, the text before its first `:`, is accepted by the pattern's
//! [`FieldMatcher`] and the remainder contains the pattern's word. A record
//! matches a compiled query when every pattern is satisfied by at least one of
//! its tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which token field a pattern applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMatcher {
    /// Only tokens stored under this qualified name.
    Exact(String),
    /// Tokens under any field.
    Any,
}

impl FieldMatcher {
    /// Returns true if a token with the given field segment is accepted.
    pub fn accepts(&self, field: &str) -> bool {
        match self {
            Self::Exact(name) => name == field,
            Self::Any => true,
        }
    }

    /// Returns the required qualified name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Exact(name) => Some(name),
            Self::Any => None,
        }
    }
}

/// Default for [`Pattern::case_insensitive`] when deserializing.
fn case_insensitive_default() -> bool {
    true
}

/// A single compiled query unit: a token under `field` whose remainder contains `word`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Field the token must be stored under.
    pub field: FieldMatcher,
    /// Literal substring the token remainder must contain.
    pub word: String,
    /// Whether the substring test ignores case.
    #[serde(default = "case_insensitive_default")]
    pub case_insensitive: bool,
}

impl Pattern {
    /// Creates a case-insensitive pattern, lowercasing `word`.
    pub fn new(field: Option<&str>, word: &str) -> Self {
        Self {
            field: field.map_or(FieldMatcher::Any, |name| FieldMatcher::Exact(name.into())),
            word: word.to_lowercase(),
            case_insensitive: true,
        }
    }

    /// Creates a pattern restricted to one qualified name.
    pub fn exact(field: &str, word: &str) -> Self {
        Self::new(Some(field), word)
    }

    /// Creates a pattern accepting any field.
    pub fn any(word: &str) -> Self {
        Self::new(None, word)
    }

    /// Returns true if `token` satisfies this pattern.
    pub fn matches_token(&self, token: &str) -> bool {
        let Some((field, rest)) = token.split_once(':') else {
            return false;
        };
        if !self.field.accepts(field) {
            return false;
        }

        if self.case_insensitive {
            rest.to_lowercase().contains(&self.word.to_lowercase())
        } else {
            rest.contains(&self.word)
        }
    }

    /// Returns true if at least one token satisfies this pattern.
    pub fn matches_any<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        tokens.iter().any(|token| self.matches_token(token.as_ref()))
    }

    /// Renders the pattern as a regular expression over whole tokens.
    ///
    /// This is the form storage engines with regex support evaluate, e.g.
    /// `(?i)^title:.*rust`. The word is escaped, so it always matches literally.
    pub fn to_regex(&self) -> String {
        let flags = if self.case_insensitive { "(?i)" } else { "" };
        let field = match &self.field {
            FieldMatcher::Exact(name) => regex::escape(name),
            FieldMatcher::Any => "[^:]+".to_string(),
        };
        format!("{flags}^{field}:.*{}", regex::escape(&self.word))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            FieldMatcher::Exact(name) => write!(f, "{name}:*{}*", self.word),
            FieldMatcher::Any => write!(f, "*:*{}*", self.word),
        }
    }
}

/// Returns true if `tokens` satisfy every pattern.
///
/// An empty pattern list is the unconditional query and matches everything.
pub fn matches_all<S: AsRef<str>>(tokens: &[S], patterns: &[Pattern]) -> bool {
    patterns.iter().all(|pattern| pattern.matches_any(tokens))
}
