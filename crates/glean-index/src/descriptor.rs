//! Descriptors for individual searchable fields.

use serde_json::Value;

use crate::{
    declaration::{SearchDeclaration, SearchOptions},
    inflect::{normalize, singularize},
    value::{Extractor, FieldValue},
};

/// One indexed field of a record type.
///
/// Descriptors are immutable once built. A registry holds one per qualified
/// name; fields reached through relations carry a prefix and an extractor
/// composed across every hop.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Record type the descriptor was resolved for.
    owning_type: String,
    /// Prefix contributed by relation hops, outermost first.
    prefix: Option<String>,
    /// The field's own name, or its alias.
    base_name: String,
    /// Name tokens are emitted under.
    qualified_name: String,
    /// Field path from the owning type, e.g. `["actors", "name"]`.
    path: Vec<String>,
    /// Declaration options, merged across relation hops.
    options: SearchOptions,
    /// Produces the field value from a record.
    extractor: Extractor,
}

impl FieldDescriptor {
    /// Builds the descriptor for a plain field declared on `owning_type`.
    pub fn direct(owning_type: &str, declaration: &SearchDeclaration) -> Self {
        let options = declaration.options.clone();
        let qualified_name = options
            .alias
            .clone()
            .unwrap_or_else(|| normalize(&declaration.field));
        let base_name = options
            .alias
            .clone()
            .unwrap_or_else(|| declaration.field.clone());

        Self {
            owning_type: owning_type.to_string(),
            prefix: None,
            base_name,
            qualified_name,
            path: vec![declaration.field.clone()],
            extractor: Extractor::field(&declaration.field),
            options,
        }
    }

    /// Builds the descriptor exposing `inner` through the relation declared by `declaration`.
    ///
    /// The hop contributes the relation alias, or the singular relation name,
    /// as a prefix segment unless `skip_prefix` is set.
    pub fn through(owning_type: &str, declaration: &SearchDeclaration, inner: &Self) -> Self {
        let options = &declaration.options;
        let hop = if options.skips_prefix() {
            None
        } else {
            Some(
                options
                    .alias
                    .clone()
                    .unwrap_or_else(|| singularize(&declaration.field)),
            )
        };

        let qualified_name = match &hop {
            Some(hop) => format!("{hop}_{}", inner.qualified_name),
            None => inner.qualified_name.clone(),
        };
        let prefix = match (hop, &inner.prefix) {
            (Some(hop), Some(deeper)) => Some(format!("{hop}_{deeper}")),
            (Some(hop), None) => Some(hop),
            (None, deeper) => deeper.clone(),
        };

        let mut path = vec![declaration.field.clone()];
        path.extend(inner.path.iter().cloned());

        Self {
            owning_type: owning_type.to_string(),
            prefix,
            base_name: inner.base_name.clone(),
            qualified_name,
            path,
            options: options.merged_over(&inner.options),
            extractor: Extractor::through(&declaration.field, inner.extractor.clone()),
        }
    }

    /// Returns the record type this descriptor was resolved for.
    pub fn owning_type(&self) -> &str {
        &self.owning_type
    }

    /// Returns the relation prefix, if the field was reached through a relation.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the field's own name or alias, without any prefix.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the name tokens for this field are stored under.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the dotted field path from the owning type, e.g. `actors.name`.
    pub fn source(&self) -> String {
        self.path.join(".")
    }

    /// Returns the merged declaration options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Returns whether punctuation is kept, falling back to `default` when unset.
    pub fn keeps_punctuation(&self, default: bool) -> bool {
        self.options.keep_punctuation.unwrap_or(default)
    }

    /// Extracts this field's value from `record`.
    pub fn value_for(&self, record: &Value) -> FieldValue {
        self.extractor.extract(record)
    }
}
