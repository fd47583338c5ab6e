//! Searchable field registries and record tokenization for glean.
//!
//! This crate turns `search_on` declarations into token indexes:
//! - Record types, plain fields, relations and declarations ([`Schema`])
//! - Recursive resolution of fields reached through relations ([`Searchables`])
//! - Deterministic naming: aliases, singular relation prefixes, `only`/`except`
//! - Flattening records into `field:word` tokens ([`Indexer`])
//! - An in-memory store that re-indexes on every write ([`MemoryStore`])
//!
//! Queries are compiled with [`glean_query`] against a [`FieldRegistry`].
//!
//! # Example
//!
//! ```
//! use glean_index::{RecordType, Relation, Schema, SearchOptions, Searchables, compile, index};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .with_type(
//!         RecordType::new("person")
//!             .field("name")
//!             .search_on("name", SearchOptions::new()),
//!     )
//!     .with_type(
//!         RecordType::new("movie")
//!             .field("title")
//!             .relation("actors", Relation::many("person"))
//!             .search_on("title", SearchOptions::new())
//!             .search_on("actors", SearchOptions::new()),
//!     );
//!
//! let searchables = Searchables::new(schema);
//! let registry = searchables.registry("movie").unwrap();
//!
//! let record = json!({"title": "Heat", "actors": [{"name": "Al Pacino"}]});
//! assert_eq!(
//!     index(&record, &registry),
//!     vec!["title:heat", "actor_name:al", "actor_name:pacino"]
//! );
//!
//! let patterns = compile("actor_name:pacino", &*registry);
//! assert_eq!(patterns.len(), 1);
//! ```

#![warn(missing_docs)]

mod declaration;
mod descriptor;
mod error;
mod indexer;
pub mod inflect;
mod registry;
mod schema;
mod store;
mod value;

pub use declaration::{SearchDeclaration, SearchOptions};
pub use descriptor::FieldDescriptor;
pub use error::SchemaError;
pub use glean_query::{FieldLookup, FieldMatcher, Pattern, compile, matches_all};
pub use indexer::{Indexer, field_values, index, normalize_words};
pub use registry::{FieldRegistry, Searchables};
pub use schema::{Cardinality, RecordType, Relation, Schema};
pub use store::{MemoryStore, StoredRecord};
pub use value::{Extractor, FieldValue};
