//! Query language for glean inline search.
//!
//! A search string is a sequence of terms:
//!
//! - **Words**: `rust` - must appear under some field
//! - **Fields**: `title:guide` - must appear under a specific field
//! - **Phrases**: `"error handling"` or `'error handling'` - every word must appear
//! - **Keys**: `metadata:director:smithee` - address an entry of a key-value field
//!
//! Terms compile to a flat list of [`Pattern`]s, all of which must be satisfied
//! by a record's stored tokens. Phrase words are not positional.
//!
//! # Example
//!
//! ```
//! use glean_query::{Pattern, compile, matches_all};
//!
//! let fields = ["title", "tag"];
//! let patterns = compile("title:guide rust", &fields[..]);
//! assert_eq!(patterns, vec![Pattern::exact("title", "guide"), Pattern::any("rust")]);
//!
//! let tokens = ["title:guide", "tag:rust"];
//! assert!(matches_all(&tokens, &patterns));
//! ```

#![warn(missing_docs)]

mod compile;
mod lexer;
mod pattern;

pub use compile::{FieldLookup, QueryCompiler, compile};
pub use lexer::{Term, scan};
pub use pattern::{FieldMatcher, Pattern, matches_all};
