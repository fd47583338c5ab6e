//! Field values and the extractors that produce them.

use std::{fmt, sync::Arc};

use serde_json::Value;

/// A value extracted from a record for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// No value; contributes no tokens.
    Absent,
    /// A single value in string form.
    Scalar(String),
    /// A sequence of values, e.g. an array field or a to-many relation.
    List(Vec<Self>),
    /// Key-value entries in source order, e.g. an embedded metadata object.
    Map(Vec<(String, Self)>),
}

impl FieldValue {
    /// Converts a JSON value.
    ///
    /// Numbers and booleans use their JSON text form.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::Scalar(s.clone()),
            Value::Bool(_) | Value::Number(_) => Self::Scalar(value.to_string()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(key, v)| (key.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Returns true for [`FieldValue::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Builds a list from per-item values, splicing nested lists into one sequence.
    pub fn flattened(items: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for item in items {
            match item {
                Self::List(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::List(flat)
    }

    /// Returns the text segments of this value in order, each tagged with the
    /// map key it was found under.
    ///
    /// Lists contribute their elements in order. A map entry tags everything
    /// below it with its key, unless an outer entry already did.
    pub fn segments(&self) -> Vec<(Option<&str>, &str)> {
        let mut out = Vec::new();
        self.collect_segments(None, &mut out);
        out
    }

    /// Recursive helper for [`FieldValue::segments`].
    fn collect_segments<'a>(
        &'a self,
        key: Option<&'a str>,
        out: &mut Vec<(Option<&'a str>, &'a str)>,
    ) {
        match self {
            Self::Absent => {}
            Self::Scalar(text) => out.push((key, text.as_str())),
            Self::List(items) => {
                for item in items {
                    item.collect_segments(key, out);
                }
            }
            Self::Map(entries) => {
                for (entry_key, value) in entries {
                    value.collect_segments(key.or(Some(entry_key.as_str())), out);
                }
            }
        }
    }
}

impl fmt::Display for FieldValue {
    /// Formats the value the way it is tokenized: list elements joined by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texts: Vec<String> = self
            .segments()
            .into_iter()
            .map(|(key, text)| match key {
                Some(key) => format!("{key}:{text}"),
                None => text.to_string(),
            })
            .collect();
        write!(f, "{}", texts.join(" "))
    }
}

/// The function type behind an [`Extractor`].
type ExtractFn = dyn Fn(&Value) -> FieldValue + Send + Sync;

/// A pure function from a record to the value of one searchable field.
#[derive(Clone)]
pub struct Extractor(Arc<ExtractFn>);

impl Extractor {
    /// Wraps an arbitrary extraction function.
    pub fn new(f: impl Fn(&Value) -> FieldValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Reads a plain field of the record.
    pub fn field(name: &str) -> Self {
        let name = name.to_string();
        Self::new(move |record| {
            record
                .get(&name)
                .map_or(FieldValue::Absent, FieldValue::from_json)
        })
    }

    /// Follows the relation `relation` and applies `inner` to each related record.
    ///
    /// A single related object yields `inner`'s value; an array yields the
    /// per-item values flattened into one list; a missing or null relation is
    /// absent.
    pub fn through(relation: &str, inner: Self) -> Self {
        let relation = relation.to_string();
        Self::new(move |record| match record.get(&relation) {
            None | Some(Value::Null) => FieldValue::Absent,
            Some(Value::Array(items)) => {
                FieldValue::flattened(items.iter().map(|item| inner.extract(item)))
            }
            Some(related) => inner.extract(related),
        })
    }

    /// Extracts the value from `record`.
    pub fn extract(&self, record: &Value) -> FieldValue {
        (self.0)(record)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Extractor(..)")
    }
}
