//! Static pattern library
//!
//! A declarative catalog of text-level detectors. Each `Pattern` is an
//! immutable record holding a stable id, a signed weight (positive =
//! AI evidence, negative = human evidence), a category, a
//! formatting-immunity flag, and a pure detection function. Patterns
//! never depend on each other and never mutate; the full set is built
//! once per process.
//!
//! Detection functions are total: a regex that fails to compile is
//! treated as matching nothing, so a single bad pattern degrades to a
//! zero contribution instead of poisoning the scan.

mod core;
mod languages;

pub use languages::packs_for;

use serde::Serialize;
use std::sync::OnceLock;

/// Compile a regex once, lazily. Yields `None` on a compile failure,
/// which the counting helpers treat as zero matches.
macro_rules! static_regex {
    ($re:expr) => {{
        static RE: ::std::sync::OnceLock<Option<::regex::Regex>> = ::std::sync::OnceLock::new();
        RE.get_or_init(|| ::regex::Regex::new($re).ok()).as_ref()
    }};
}
pub(crate) use static_regex;

/// Pattern grouping used for reporting and formatting discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Linguistic,
    CodeStructure,
    Naming,
    ErrorHandling,
    Documentation,
    SpecialChars,
    Vocabulary,
    HumanMarkers,
    Language,
    Testing,
}

/// One immutable text-level detector.
pub struct Pattern {
    pub id: &'static str,
    pub name: &'static str,
    /// Signed: positive weights accuse, negative weights exonerate.
    pub weight: f64,
    pub category: PatternCategory,
    /// True if an auto-formatter cannot erase this signal.
    pub immune_to_formatting: bool,
    /// Pure, total count of occurrences in the given text.
    pub detect: fn(&str) -> i64,
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("id", &self.id)
            .field("weight", &self.weight)
            .field("category", &self.category)
            .finish()
    }
}

/// The full general-purpose catalog (language packs excluded).
pub fn catalog() -> &'static [Pattern] {
    static CATALOG: OnceLock<Vec<Pattern>> = OnceLock::new();
    CATALOG.get_or_init(core::build_catalog)
}

// --- Shared text helpers -------------------------------------------------

/// Count matches of a possibly-unavailable regex.
pub(crate) fn count_matches(re: Option<&regex::Regex>, text: &str) -> i64 {
    re.map(|r| r.find_iter(text).count() as i64).unwrap_or(0)
}

/// True when a possibly-unavailable regex matches anywhere.
pub(crate) fn is_match(re: Option<&regex::Regex>, text: &str) -> bool {
    re.map(|r| r.is_match(text)).unwrap_or(false)
}

/// Pull all comment text (//, /* */, #) out of a file, joined by
/// newlines. Approximate - string literals containing comment markers
/// will leak in, which is acceptable noise for counting heuristics.
pub(crate) fn extract_comments(code: &str) -> String {
    let mut comments = Vec::new();
    if let Some(re) = static_regex!(r"(?m)//.*$") {
        comments.extend(re.find_iter(code).map(|m| m.as_str()));
    }
    if let Some(re) = static_regex!(r"(?s)/\*.*?\*/") {
        comments.extend(re.find_iter(code).map(|m| m.as_str()));
    }
    if let Some(re) = static_regex!(r"(?m)#.*$") {
        comments.extend(re.find_iter(code).map(|m| m.as_str()));
    }
    comments.join("\n")
}

/// Rough function count across JS/TS/Python shapes.
pub(crate) fn count_functions(code: &str) -> i64 {
    let mut total = 0;
    total += count_matches(static_regex!(r"function\s+\w+"), code);
    total += count_matches(static_regex!(r"\w+\s*=\s*function"), code);
    total += count_matches(static_regex!(r"\w+\s*=\s*\([^)]*\)\s*=>"), code);
    total += count_matches(static_regex!(r"def\s+\w+"), code);
    total
}
