//! Flattening records into token sequences.
//!
//! Every descriptor of a registry contributes tokens `qualified_name:word`,
//! in registry order and then word order. Words are lowercased and split on
//! whitespace after punctuation is replaced with spaces. Values found under a
//! map key produce `qualified_name:key:word` instead.

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::{descriptor::FieldDescriptor, error::SchemaError, registry::FieldRegistry};

/// Produces the token sequence of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indexer {
    /// Punctuation handling for descriptors that do not set it themselves.
    keep_punctuation: bool,
}

impl Indexer {
    /// Creates an indexer that strips punctuation by default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the punctuation default for descriptors without their own setting.
    pub fn keep_punctuation(mut self, keep: bool) -> Self {
        self.keep_punctuation = keep;
        self
    }

    /// Returns the tokens of `record` for every field in `registry`.
    pub fn index(&self, record: &Value, registry: &FieldRegistry) -> Vec<String> {
        let tokens: Vec<String> = registry
            .iter()
            .flat_map(|descriptor| self.tokens_for(descriptor, record))
            .collect();
        trace!(
            record_type = registry.record_type(),
            tokens = tokens.len(),
            "indexed record"
        );
        tokens
    }

    /// Serializes `record` to JSON and indexes it.
    pub fn index_serializable<T: Serialize + ?Sized>(
        &self,
        record: &T,
        registry: &FieldRegistry,
    ) -> Result<Vec<String>, SchemaError> {
        let value = serde_json::to_value(record)?;
        Ok(self.index(&value, registry))
    }

    /// Returns the tokens one descriptor contributes for `record`.
    pub fn tokens_for(&self, descriptor: &FieldDescriptor, record: &Value) -> Vec<String> {
        let keep = descriptor.keeps_punctuation(self.keep_punctuation);
        let name = descriptor.qualified_name();
        let value = descriptor.value_for(record);

        let mut tokens = Vec::new();
        for (key, text) in value.segments() {
            let field = match key {
                Some(key) => format!("{name}:{}", normalize_key(key)),
                None => name.to_string(),
            };
            tokens.extend(
                normalize_words(text, keep)
                    .into_iter()
                    .map(|word| format!("{field}:{word}")),
            );
        }
        tokens
    }
}

/// Indexes `record` with the default [`Indexer`].
pub fn index(record: &Value, registry: &FieldRegistry) -> Vec<String> {
    Indexer::new().index(record, registry)
}

/// Lowercases `text` and splits it into words.
///
/// Unless `keep_punctuation` is set, punctuation is replaced with spaces first,
/// so `"Rust-lang, 2nd ed."` yields `rust`, `lang`, `2nd`, `ed`.
pub fn normalize_words(text: &str, keep_punctuation: bool) -> Vec<String> {
    let text: String = if keep_punctuation {
        text.to_lowercase()
    } else {
        text.chars()
            .map(|c| if is_punctuation(c) { ' ' } else { c })
            .collect::<String>()
            .to_lowercase()
    };
    text.split_whitespace().map(str::to_string).collect()
}

/// Returns the words stored under `qualified_name` in a token sequence.
///
/// Key-value tokens keep their key, so `metadata:director:alan` yields
/// `director:alan` for `metadata`.
pub fn field_values<'a, S: AsRef<str>>(tokens: &'a [S], qualified_name: &str) -> Vec<&'a str> {
    tokens
        .iter()
        .filter_map(|token| {
            let (field, rest) = token.as_ref().split_once(':')?;
            (field == qualified_name).then_some(rest)
        })
        .collect()
}

/// Renders a map key as a single token segment.
fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == ':' { '_' } else { c })
        .collect()
}

/// Returns true for ASCII and common Unicode punctuation.
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{3001}'..='\u{3003}'
                | '\u{3008}'..='\u{3011}'
                | '¡'
                | '¿'
                | '«'
                | '»'
                | '§'
                | '¶'
                | '·'
        )
}
