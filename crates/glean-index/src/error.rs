//! Error types for the glean-index crate.

use thiserror::Error;

/// Errors raised while resolving searchable fields or indexing records.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The record type is not part of the schema.
    #[error("unknown record type: {0}")]
    UnknownType(String),

    /// A search declaration names neither a plain field nor a relation.
    #[error("{record_type}: cannot search on '{field}': not a field or relation")]
    UnknownField {
        /// Type carrying the declaration.
        record_type: String,
        /// Declared field name.
        field: String,
    },

    /// A relation points at a record type the schema does not define.
    #[error("{record_type}.{field}: related type '{target}' is not defined")]
    UnknownRelationTarget {
        /// Type owning the relation.
        record_type: String,
        /// Relation field name.
        field: String,
        /// Missing target type.
        target: String,
    },

    /// Searchable relations loop back to a type already being resolved.
    #[error("cyclic searchable relations: {}", path.join(" -> "))]
    CyclicRelation {
        /// Record types along the cycle, ending with the repeated type.
        path: Vec<String>,
    },

    /// A record could not be converted to its JSON form.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}
