//! Query scanner.
//!
//! Splits a free-text search string into [`Term`]s, left to right and greedily:
//!
//! ```text
//! term  → FIELD ":" (KEY ":")* value | value
//! value → PHRASE | RUN
//! ```
//!
//! `FIELD` only counts when the lookup recognizes it; otherwise the whole
//! non-whitespace run, colons included, is a single bare value. Phrases are
//! delimited by matching `"` or `'` quotes. An unterminated quote is not an
//! error: the text is read as an ordinary run instead.

use crate::compile::FieldLookup;

/// Characters that may open (and must close) a quoted phrase.
const QUOTES: [char; 2] = ['"', '\''];

/// Separator between a field alias, its keys and the value.
const SEPARATOR: char = ':';

/// A single term recovered from a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Canonical qualified name, present when the term carried a recognized field alias.
    pub field: Option<String>,
    /// Key segments between the field alias and the value (`metadata:director:alan`).
    pub keys: Vec<String>,
    /// Value text, with phrase quotes stripped.
    pub value: String,
    /// True when the value was a quoted phrase.
    pub phrase: bool,
}

impl Term {
    /// Creates a fieldless term from a bare value.
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            field: None,
            keys: Vec::new(),
            value: value.into(),
            phrase: false,
        }
    }

    /// Returns the words this term requires: key segments first, then the value
    /// split on whitespace.
    ///
    /// Value words lose leading and trailing non-word characters; words made
    /// only of such characters are dropped.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str).chain(
            self.value
                .split_whitespace()
                .map(|word| word.trim_matches(|c: char| !is_word_char(c)))
                .filter(|word| !word.is_empty()),
        )
    }
}

/// Letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scans a query string into terms.
struct Lexer<'a, F: ?Sized> {
    /// The original input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
    /// Recognizes field aliases.
    fields: &'a F,
}

impl<'a, F: FieldLookup + ?Sized> Lexer<'a, F> {
    /// Creates a new lexer over the given input.
    fn new(input: &'a str, fields: &'a F) -> Self {
        Self {
            input,
            position: 0,
            fields,
        }
    }

    /// Scans the entire input.
    fn scan(mut self) -> Vec<Term> {
        let mut terms = Vec::new();

        while let Some(term) = self.next_term() {
            terms.push(term);
        }

        terms
    }

    /// Returns the next term, or None at end of input.
    fn next_term(&mut self) -> Option<Term> {
        self.skip_whitespace();

        if self.rest().is_empty() {
            return None;
        }

        if let Some(term) = self.read_field_term() {
            return Some(term);
        }

        let (value, phrase) = self.read_value();
        Some(Term {
            phrase,
            ..Term::bare(value)
        })
    }

    /// Reads `FIELD ":" (KEY ":")* value` when the leading alias is recognized.
    ///
    /// Leaves the position untouched and returns None when it is not.
    fn read_field_term(&mut self) -> Option<Term> {
        let run = self.current_run();
        if run.starts_with(QUOTES) {
            return None;
        }

        let colon = run.find(SEPARATOR)?;
        let alias = &run[..colon];
        // An alias with nothing after its colon is just a bare run ending in ':'.
        if alias.is_empty() || colon + 1 == run.len() {
            return None;
        }

        let field = self.fields.lookup(alias)?.to_string();
        self.position += colon + 1;

        let keys = self.read_keys();
        let (value, phrase) = self.read_value();

        Some(Term {
            field: Some(field),
            keys,
            value,
            phrase,
        })
    }

    /// Reads any `KEY ":"` segments preceding a field value.
    fn read_keys(&mut self) -> Vec<String> {
        let mut keys = Vec::new();

        loop {
            let run = self.current_run();
            if run.starts_with(QUOTES) {
                break;
            }
            let Some(colon) = run.find(SEPARATOR) else {
                break;
            };
            let key = &run[..colon];
            if key.is_empty() || key.contains(QUOTES) {
                break;
            }
            keys.push(key.to_string());
            self.position += colon + 1;
        }

        keys
    }

    /// Reads a phrase or a run of non-whitespace, returning the text and whether it was quoted.
    fn read_value(&mut self) -> (String, bool) {
        if let Some(phrase) = self.read_phrase() {
            return (phrase, true);
        }

        let run = self.current_run().to_string();
        self.position += run.len();
        (run, false)
    }

    /// Reads a quoted phrase whose closing quote exists and whose content is non-empty.
    fn read_phrase(&mut self) -> Option<String> {
        let rest = self.rest();
        let quote = rest.chars().next().filter(|c| QUOTES.contains(c))?;
        let body = &rest[quote.len_utf8()..];
        let close = body.find(quote)?;
        if close == 0 {
            return None;
        }

        let content = body[..close].to_string();
        self.position += quote.len_utf8() * 2 + close;
        Some(content)
    }

    /// Returns the run of non-whitespace characters at the current position.
    fn current_run(&self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Returns the unread part of the input.
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }
}

/// Scans a query string into terms, recognizing field aliases through `fields`.
pub fn scan<F: FieldLookup + ?Sized>(input: &str, fields: &F) -> Vec<Term> {
    Lexer::new(input, fields).scan()
}
