//! `search_on` declarations and their options.

use serde::{Deserialize, Serialize};

/// Options attached to a `search_on` declaration.
///
/// Flags are optional so that options merged across a relation hop can tell
/// "not set" apart from an explicit `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Renames the field. On a relation it replaces the relation's prefix segment.
    pub alias: Option<String>,
    /// Relation fields only: expose just these qualified names of the related type.
    pub only: Vec<String>,
    /// Relation fields only: hide these qualified names of the related type.
    pub except: Vec<String>,
    /// Relation fields only: add no prefix segment for this hop.
    pub skip_prefix: Option<bool>,
    /// Keep punctuation in indexed words instead of replacing it with spaces.
    pub keep_punctuation: Option<bool>,
}

impl SearchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Restricts the related fields exposed through a relation.
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = names.into_iter().map(Into::into).collect();
        self
    }

    /// Hides related fields exposed through a relation.
    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = names.into_iter().map(Into::into).collect();
        self
    }

    /// Suppresses this hop's prefix segment.
    pub fn skip_prefix(mut self, skip: bool) -> Self {
        self.skip_prefix = Some(skip);
        self
    }

    /// Keeps punctuation when tokenizing.
    pub fn keep_punctuation(mut self, keep: bool) -> Self {
        self.keep_punctuation = Some(keep);
        self
    }

    /// Returns true if this hop should not contribute a prefix.
    pub fn skips_prefix(&self) -> bool {
        self.skip_prefix.unwrap_or(false)
    }

    /// Returns true if a related field with this qualified name passes `only`/`except`.
    pub fn exposes(&self, name: &str) -> bool {
        (self.only.is_empty() || self.only.iter().any(|n| n == name))
            && !self.except.iter().any(|n| n == name)
    }

    /// Merges these (outer) options over `inner`; values set here win.
    pub fn merged_over(&self, inner: &Self) -> Self {
        Self {
            alias: self.alias.clone().or_else(|| inner.alias.clone()),
            only: pick(&self.only, &inner.only),
            except: pick(&self.except, &inner.except),
            skip_prefix: self.skip_prefix.or(inner.skip_prefix),
            keep_punctuation: self.keep_punctuation.or(inner.keep_punctuation),
        }
    }
}

/// Returns `outer` unless it is empty.
fn pick(outer: &[String], inner: &[String]) -> Vec<String> {
    let chosen = if outer.is_empty() { inner } else { outer };
    chosen.to_vec()
}

/// A single `search_on(field, options)` declaration on a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDeclaration {
    /// Plain field or relation name on the declaring type.
    pub field: String,
    /// Declaration options.
    #[serde(flatten)]
    pub options: SearchOptions,
}

impl SearchDeclaration {
    /// Creates a declaration.
    pub fn new(field: impl Into<String>, options: SearchOptions) -> Self {
        Self {
            field: field.into(),
            options,
        }
    }
}
