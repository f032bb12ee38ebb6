use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Whole-word, case-insensitive replacements applied to narration text before synthesis.
///
/// Applied in order, each on the output of the previous one.
pub const PRONUNCIATIONS: &[(&str, &str)] = &[
    ("d.rymcg.tech", "dee dot rye mic gee dot tech"),
    ("Traefik", "traffic"),
    ("443", "four four three"),
];

/// Compiled [`PRONUNCIATIONS`]: case-insensitive, bounded by ASCII word boundaries.
static PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PRONUNCIATIONS
        .iter()
        .filter_map(|&(word, spoken)| {
            let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(word));
            match Regex::new(&pattern) {
                Ok(re) => Some((re, spoken)),
                Err(e) => {
                    tracing::warn!(word, error = %e, "skipping pronunciation entry");
                    None
                }
            }
        })
        .collect()
});

/// Rewrite `text` with [`PRONUNCIATIONS`].
pub fn apply(text: &str) -> String {
    PATTERNS
        .iter()
        .fold(text.to_owned(), |acc, (re, spoken)| {
            re.replace_all(&acc, NoExpand(spoken)).into_owned()
        })
}
