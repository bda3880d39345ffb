//! Cognitive-complexity dimension
//!
//! Crude complexity proxies from keyword counts. Generated code sits
//! in an uncanny valley: either naively flat (long file, no branching)
//! or needlessly academic (guard clauses and early returns far in
//! excess of actual decisions). Premature abstraction on top of low
//! complexity - a Factory with nothing to build - is a strong tell.

use crate::config::AnalyzerConfig;
use crate::models::{clamp_score, DimensionResult};
use crate::patterns::static_regex;
use serde::Serialize;

/// Evidence from the complexity proxies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CognitiveSignal {
    pub score: f64,
    pub complexity: i64,
    pub density: f64,
    pub is_academic: bool,
    pub is_naive: bool,
    pub abstraction_count: i64,
}

impl CognitiveSignal {
    pub fn as_result(&self) -> DimensionResult {
        DimensionResult::new(self.score, self)
    }
}

fn keyword_count(code: &str, re: Option<&regex::Regex>) -> i64 {
    re.map(|r| r.find_iter(code).count() as i64).unwrap_or(0)
}

pub fn analyze_cognitive(code: &str, _config: &AnalyzerConfig) -> CognitiveSignal {
    let ifs = keyword_count(code, static_regex!(r"\bif\b"));
    let elses = keyword_count(code, static_regex!(r"\belse\b"));
    let fors = keyword_count(code, static_regex!(r"\bfor\b"));
    let whiles = keyword_count(code, static_regex!(r"\bwhile\b"));
    let switches = keyword_count(code, static_regex!(r"\bswitch\b"));
    let catches = keyword_count(code, static_regex!(r"\bcatch\b"));
    let returns = keyword_count(code, static_regex!(r"\breturn\b"));

    let complexity = ifs + elses + fors + whiles + switches + catches;
    let lines = code.lines().count() as i64;
    let density = if lines > 0 {
        complexity as f64 / lines as f64
    } else {
        0.0
    };

    // Early returns far beyond the decision count, on an otherwise
    // simple file - the textbook guard-clause cascade.
    let is_academic = returns as f64 > ifs as f64 * 1.5 && complexity < 10 && returns > 2;

    // A long file with almost no control flow: boilerplate.
    let is_naive = complexity < 3 && lines > 20;

    // Factories, I-prefixed interfaces, abstract classes
    let abstraction_count = keyword_count(
        code,
        static_regex!(r"class \w+Factory|interface I[A-Z]\w+|abstract class"),
    );

    let mut score = 0.0;
    if is_academic {
        score += 30.0;
    }
    if is_naive {
        score += 10.0;
    }
    // Abstraction with nothing to abstract
    if abstraction_count > 0 && complexity < 5 {
        score += 40.0;
    }

    CognitiveSignal {
        score: clamp_score(score),
        complexity,
        density,
        is_academic,
        is_naive,
        abstraction_count,
    }
}
