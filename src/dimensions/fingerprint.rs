//! Model-fingerprint dimension
//!
//! Named signature bundles of regexes empirically associated with
//! specific model "accents" - phrasing templates and structural tics.
//! The score escalates in discrete steps as the match count against
//! the single best-matching model crosses fixed thresholds. The
//! dominant model name is reported for display only; it never affects
//! scoring beyond the count.

use crate::config::AnalyzerConfig;
use crate::models::{clamp_score, DimensionResult};
use crate::patterns::static_regex;
use serde::Serialize;

/// One model's signature bundle.
struct ModelSignature {
    name: &'static str,
    count: fn(&str) -> usize,
}

fn count_all(code: &str, regexes: &[Option<&regex::Regex>]) -> usize {
    regexes
        .iter()
        .flatten()
        .map(|re| re.find_iter(code).count())
        .sum()
}

fn gpt_matches(code: &str) -> usize {
    count_all(
        code,
        &[
            static_regex!(r"(?i)// Helper function to"),
            static_regex!(r"(?i)// Function to"),
            static_regex!(r"const \w+ = async \(\) =>"),
            static_regex!(r"if \(!\w+\) return;"),
            static_regex!(r"module\.exports ="),
        ],
    )
}

fn claude_matches(code: &str) -> usize {
    count_all(
        code,
        &[
            static_regex!(r"(?i)// This function (handles|manages|provides)"),
            static_regex!(r"Object\.freeze\("),
            static_regex!(r"new (Map|Set)\("),
            static_regex!(r"\.reduce\(\(acc, \w+\) =>"),
            static_regex!(r"import \{ .* \} from"),
        ],
    )
}

fn copilot_matches(code: &str) -> usize {
    count_all(
        code,
        &[
            static_regex!(r"(?i)// Path: .*"),
            static_regex!(r"\bvar \w+"),
            static_regex!(r"console\.log\('Error:',"),
        ],
    )
}

fn gemini_matches(code: &str) -> usize {
    count_all(
        code,
        &[
            static_regex!(r"\?\?"),
            static_regex!(r"\?\. "),
            static_regex!(r"const \{ .* \} = require"),
        ],
    )
}

const SIGNATURES: &[ModelSignature] = &[
    ModelSignature {
        name: "GPT-4/ChatGPT",
        count: gpt_matches,
    },
    ModelSignature {
        name: "Claude",
        count: claude_matches,
    },
    ModelSignature {
        name: "GitHub Copilot",
        count: copilot_matches,
    },
    ModelSignature {
        name: "Gemini",
        count: gemini_matches,
    },
];

/// Per-model match tally, reported for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMatch {
    pub model: &'static str,
    pub count: usize,
}

/// Evidence from the fingerprint scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FingerprintSignal {
    pub score: f64,
    /// Match count of the best-matching model.
    pub max_matches: usize,
    /// Name of the dominant model, when any signature fired.
    pub detected: Option<&'static str>,
    pub matches: Vec<ModelMatch>,
}

impl FingerprintSignal {
    pub fn as_result(&self) -> DimensionResult {
        DimensionResult::new(self.score, self)
    }
}

pub fn analyze_fingerprint(code: &str, config: &AnalyzerConfig) -> FingerprintSignal {
    let mut detected = None;
    let mut max_matches = 0usize;
    let mut matches = Vec::new();

    for signature in SIGNATURES {
        let count = (signature.count)(code);
        if count == 0 {
            continue;
        }
        matches.push(ModelMatch {
            model: signature.name,
            count,
        });
        if count > max_matches {
            max_matches = count;
            detected = Some(signature.name);
        }
    }

    // Escalate in discrete steps as the dominant model's match count
    // crosses each threshold.
    let mut score = 0.0;
    for (threshold, step_score) in config.fingerprint.steps {
        if max_matches >= threshold {
            score = step_score;
        }
    }

    FingerprintSignal {
        score: clamp_score(score),
        max_matches,
        detected,
        matches,
    }
}
