//! English inflection for field and relation names.
//!
//! Qualified names are built from declared field names: plain fields are
//! canonicalized with [`normalize`], relation prefixes with [`singularize`].
//! Rules apply to the last `_`-separated segment of a name, so
//! `release_dates` singularizes to `release_date`.

/// Words with no distinct singular and plural forms.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "jeans",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Irregular `(singular, plural)` pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("move", "moves"),
    ("ox", "oxen"),
    ("person", "people"),
    ("sex", "sexes"),
    ("tooth", "teeth"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

/// A suffix rewrite: drop this many trailing bytes, then append the text.
type Rewrite = (usize, &'static str);

/// Leaves a word unchanged.
const KEEP: Rewrite = (0, "");

/// Returns the plural form of `word`.
pub fn pluralize(word: &str) -> String {
    inflect(word, plural_rewrite)
}

/// Returns the singular form of `word`.
pub fn singularize(word: &str) -> String {
    inflect(word, singular_rewrite)
}

/// Canonicalizes a field name to its singular form, whatever number it was written in.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(word: &str) -> String {
    singularize(&pluralize(word))
}

/// Applies a rewrite rule to the last segment of `word`.
fn inflect(word: &str, rule: fn(&str) -> Rewrite) -> String {
    let (head, tail) = match word.rfind('_') {
        Some(index) => word.split_at(index + 1),
        None => ("", word),
    };
    if tail.is_empty() {
        return word.to_string();
    }

    let lower = tail.to_ascii_lowercase();
    let (drop, append) = rule(&lower);
    // Rules only ever drop ASCII suffixes, so the byte offset is a char boundary.
    let keep = &tail[..tail.len() - drop];
    format!("{head}{keep}{append}")
}

/// Returns true if `word` ends with any of `suffixes`.
fn ends_any(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| word.ends_with(suffix))
}

/// Returns true if the byte `offset` positions before the end is a vowel.
fn vowel_before(word: &str, offset: usize) -> bool {
    word.len() > offset && b"aeiouy".contains(&word.as_bytes()[word.len() - offset - 1])
}

/// Plural rules, most specific first.
fn plural_rewrite(w: &str) -> Rewrite {
    if UNCOUNTABLE.contains(&w) {
        return KEEP;
    }
    for (singular, plural) in IRREGULAR {
        if w == *singular {
            return (w.len(), *plural);
        }
        if w == *plural {
            return KEEP;
        }
    }

    if w == "mouse" || w == "louse" {
        (4, "ice")
    } else if w.ends_with("quiz") {
        (0, "zes")
    } else if w.ends_with("matrix") {
        (1, "ces")
    } else if ends_any(w, &["vertex", "index"]) {
        (2, "ices")
    } else if ends_any(w, &["x", "ch", "ss", "sh"]) {
        (0, "es")
    } else if w.len() > 1 && w.ends_with('y') && (w.ends_with("quy") || !vowel_before(w, 1)) {
        (1, "ies")
    } else if ends_any(w, &["knife", "wife"]) || w == "life" {
        (2, "ves")
    } else if ends_any(w, &["lf", "rf"]) {
        (1, "ves")
    } else if w.ends_with("sis") {
        (2, "es")
    } else if ends_any(w, &["buffalo", "echo", "hero", "potato", "tomato"]) {
        (0, "es")
    } else if ends_any(w, &["bus", "alias", "status"]) {
        (0, "es")
    } else if ends_any(w, &["octopus", "virus"]) {
        (2, "i")
    } else if ends_any(w, &["axis", "testis"]) {
        (2, "es")
    } else if w.ends_with('s') {
        KEEP
    } else {
        (0, "s")
    }
}

/// Singular rules, most specific first.
fn singular_rewrite(w: &str) -> Rewrite {
    if UNCOUNTABLE.contains(&w) {
        return KEEP;
    }
    for (singular, plural) in IRREGULAR {
        if w == *plural {
            return (w.len(), *singular);
        }
        if w == *singular {
            return KEEP;
        }
    }

    if w.ends_with("ss") {
        KEEP
    } else if w.ends_with("quizzes") {
        (3, "")
    } else if w.ends_with("matrices") {
        (3, "x")
    } else if ends_any(w, &["vertices", "indices"]) {
        (4, "ex")
    } else if ends_any(w, &["octopi", "viri"]) {
        (1, "us")
    } else if ends_any(w, &["aliases", "statuses", "buses"]) {
        (2, "")
    } else if ends_any(w, &["octopus", "virus", "alias", "status", "bus"]) {
        KEEP
    } else if w == "mice" || w == "lice" {
        (3, "ouse")
    } else if ends_any(
        w,
        &[
            "analyses",
            "crises",
            "diagnoses",
            "parentheses",
            "prognoses",
            "synopses",
            "testes",
            "theses",
        ],
    ) {
        (2, "is")
    } else if w.ends_with("sis") {
        KEEP
    } else if ends_any(w, &["buffaloes", "echoes", "heroes", "potatoes", "tomatoes"]) {
        (2, "")
    } else if ends_any(w, &["xes", "ches", "sses", "shes"]) {
        (2, "")
    } else if w.ends_with("movies") {
        (1, "")
    } else if w.len() > 3 && w.ends_with("ies") && (w.ends_with("quies") || !vowel_before(w, 3)) {
        (3, "y")
    } else if ends_any(w, &["knives", "wives"]) || w == "lives" {
        (3, "fe")
    } else if ends_any(w, &["lves", "rves"]) {
        (3, "f")
    } else if w.ends_with("us") {
        KEEP
    } else if w.ends_with('s') {
        (1, "")
    } else {
        KEEP
    }
}
