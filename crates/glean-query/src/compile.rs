//! Query compiler.
//!
//! Turns a free-text search string into the ordered list of [`Pattern`]s a
//! storage layer evaluates as a conjunction.

use crate::{
    lexer::{Term, scan},
    pattern::Pattern,
};

/// Recognizes field aliases in query strings.
///
/// Implemented by anything that knows the searchable qualified names of a
/// record type. Recognition ignores case; the returned name is the canonical
/// one tokens are stored under.
pub trait FieldLookup {
    /// Returns the canonical qualified name for `alias`, if it names a field.
    fn lookup(&self, alias: &str) -> Option<&str>;
}

impl<S: AsRef<str>> FieldLookup for [S] {
    fn lookup(&self, alias: &str) -> Option<&str> {
        let alias = alias.to_lowercase();
        self.iter()
            .map(|name| name.as_ref())
            .find(|name| name.to_lowercase() == alias)
    }
}

impl<S: AsRef<str>> FieldLookup for Vec<S> {
    fn lookup(&self, alias: &str) -> Option<&str> {
        self.as_slice().lookup(alias)
    }
}

/// Compiles query strings against a fixed set of searchable fields.
pub struct QueryCompiler<'a, F: ?Sized> {
    /// Field alias recognizer.
    fields: &'a F,
}

impl<'a, F: FieldLookup + ?Sized> QueryCompiler<'a, F> {
    /// Creates a compiler recognizing the fields known to `fields`.
    pub fn new(fields: &'a F) -> Self {
        Self { fields }
    }

    /// Compiles a query string into patterns.
    ///
    /// A blank query compiles to no patterns, the unconditional match.
    pub fn compile(&self, query: &str) -> Vec<Pattern> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        scan(query, self.fields)
            .iter()
            .flat_map(Self::term_patterns)
            .collect()
    }

    /// Emits one pattern per word of a term.
    fn term_patterns(term: &Term) -> Vec<Pattern> {
        term.words()
            .map(|word| Pattern::new(term.field.as_deref(), word))
            .collect()
    }
}

/// Convenience function to compile a query string.
pub fn compile<F: FieldLookup + ?Sized>(query: &str, fields: &F) -> Vec<Pattern> {
    QueryCompiler::new(fields).compile(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldMatcher;

    /// Field names used throughout these tests.
    const FIELDS: &[&str] = &["title", "metadata", "tag"];

    #[test]
    fn blank_query_is_unconditional() {
        assert!(compile("", FIELDS).is_empty());
        assert!(compile("  \n\t", FIELDS).is_empty());
    }

    #[test]
    fn bare_words_are_wildcards() {
        assert_eq!(
            compile("Rust Async", FIELDS),
            vec![Pattern::any("rust"), Pattern::any("async")]
        );
    }

    #[test]
    fn field_words_are_exact() {
        assert_eq!(
            compile("title:Guide rust", FIELDS),
            vec![Pattern::exact("title", "guide"), Pattern::any("rust")]
        );
    }

    #[test]
    fn alias_resolves_to_canonical_name() {
        let patterns = compile("TAG:tutorial", FIELDS);
        assert_eq!(patterns[0].field, FieldMatcher::Exact("tag".into()));
    }

    #[test]
    fn phrase_is_an_unordered_word_set() {
        assert_eq!(
            compile("title:\"getting started\"", FIELDS),
            vec![
                Pattern::exact("title", "getting"),
                Pattern::exact("title", "started")
            ]
        );
    }

    #[test]
    fn unknown_alias_keeps_colon() {
        assert_eq!(compile("genre:drama", FIELDS), vec![Pattern::any("genre:drama")]);
    }

    #[test]
    fn unterminated_phrase_is_literal() {
        assert_eq!(
            compile("title:\"getting started", FIELDS),
            vec![Pattern::exact("title", "getting"), Pattern::any("started")]
        );
    }

    #[test]
    fn edge_punctuation_is_trimmed() {
        assert_eq!(
            compile("hello, rock & roll title:(world)", FIELDS),
            vec![
                Pattern::any("hello"),
                Pattern::any("rock"),
                Pattern::any("roll"),
                Pattern::exact("title", "world")
            ]
        );
    }

    #[test]
    fn punctuation_only_query_is_unconditional() {
        assert!(compile("\"\"", FIELDS).is_empty());
        assert!(compile("& --", FIELDS).is_empty());
    }

    #[test]
    fn key_segments_become_words() {
        assert_eq!(
            compile("metadata:resolution:1080p", FIELDS),
            vec![
                Pattern::exact("metadata", "resolution"),
                Pattern::exact("metadata", "1080p")
            ]
        );
        assert_eq!(
            compile("metadata:director:'alan smithee'", FIELDS),
            vec![
                Pattern::exact("metadata", "director"),
                Pattern::exact("metadata", "alan"),
                Pattern::exact("metadata", "smithee")
            ]
        );
    }

    #[test]
    fn patterns_keep_term_then_word_order() {
        let patterns = compile("b title:\"c d\" a", FIELDS);
        let words: Vec<&str> = patterns.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(words, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn compilation_is_deterministic() {
        let query = "title:rust 'error handling' genre:x";
        assert_eq!(compile(query, FIELDS), compile(query, FIELDS));
    }

    #[test]
    fn compiler_struct_matches_function() {
        let fields = vec!["title".to_string()];
        let compiler = QueryCompiler::new(&fields);
        assert_eq!(compiler.compile("title:x"), compile("title:x", &fields));
    }
}
