//! Record types, their fields and relations.
//!
//! The [`Schema`] is the relation resolver searchable fields are built
//! against: for a record type and a field name it says whether the field is a
//! plain field, a relation to another record type, or unknown.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::declaration::{SearchDeclaration, SearchOptions};

/// How many related records a relation yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// A single embedded record.
    #[default]
    One,
    /// An array of embedded records.
    Many,
}

/// A relation from one record type to another.
///
/// Related records are read from the owning record under the relation's field
/// name. The cardinality documents the expected shape; at index time the shape
/// found in the record wins, so an array under a `One` relation is still
/// flattened and a lone object under a `Many` relation counts as one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Name of the related record type.
    pub target: String,
    /// Whether the relation yields one record or many.
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl Relation {
    /// Creates a relation to a single record.
    pub fn one(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            cardinality: Cardinality::One,
        }
    }

    /// Creates a relation to many records.
    pub fn many(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            cardinality: Cardinality::Many,
        }
    }
}

/// A record type: its plain fields, relations and search declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordType {
    /// Type name.
    name: String,
    /// Plain (non-relation) field names.
    fields: BTreeSet<String>,
    /// Relation field name -> relation.
    relations: BTreeMap<String, Relation>,
    /// `search_on` declarations in declaration order.
    declarations: Vec<SearchDeclaration>,
}

impl RecordType {
    /// Creates an empty record type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a plain field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }

    /// Adds a relation field.
    pub fn relation(mut self, name: impl Into<String>, relation: Relation) -> Self {
        self.relations.insert(name.into(), relation);
        self
    }

    /// Declares a field searchable.
    pub fn search_on(mut self, field: impl Into<String>, options: SearchOptions) -> Self {
        self.declarations
            .push(SearchDeclaration::new(field, options));
        self
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if `name` is a plain field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    /// Returns the relation named `name`, if any.
    pub fn relation_for(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    /// Returns the plain field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Returns the relations by field name.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &Relation)> {
        self.relations.iter().map(|(name, r)| (name.as_str(), r))
    }

    /// Returns the search declarations in declaration order.
    pub fn declarations(&self) -> &[SearchDeclaration] {
        &self.declarations
    }
}

/// All record types known to the search layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Record types by name.
    types: BTreeMap<String, RecordType>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record type, replacing any type with the same name.
    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.insert(record_type);
        self
    }

    /// Adds a record type, replacing any type with the same name.
    pub fn insert(&mut self, record_type: RecordType) {
        self.types.insert(record_type.name.clone(), record_type);
    }

    /// Returns the record type named `name`.
    pub fn get(&self, name: &str) -> Option<&RecordType> {
        self.types.get(name)
    }

    /// Resolves `field` on `record_type` as a relation.
    pub fn relation(&self, record_type: &str, field: &str) -> Option<&Relation> {
        self.get(record_type)?.relation_for(field)
    }

    /// Returns the record type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Returns the number of record types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the schema has no record types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
