//! Constructive-chaos dimension (human evidence, inverted polarity)
//!
//! Humans leave hacks, commented-out corpses, mixed quoting, and
//! forgotten debug prints. Assistants do not. This dimension scores
//! on the *human* scale; fusion subtracts it from the AI-evidence
//! total and treats its presence as high-reliability exoneration.

use crate::config::AnalyzerConfig;
use crate::models::{clamp_score, DimensionResult};
use crate::patterns::static_regex;
use serde::Serialize;

/// Evidence of organically messy, human authorship.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChaosSignal {
    /// Human-evidence score; higher = more clearly human.
    pub score: f64,
    pub signs: Vec<String>,
}

impl ChaosSignal {
    pub fn as_result(&self) -> DimensionResult {
        DimensionResult::new(self.score, self)
    }
}

pub fn analyze_chaos(code: &str, _config: &AnalyzerConfig) -> ChaosSignal {
    let mut score = 0.0;
    let mut signs = Vec::new();

    // Honest hack markers. Polite assistants never admit to these.
    let hack_markers = [
        static_regex!(r"(?i)HACK:"),
        static_regex!(r"(?i)FIXME:"),
        static_regex!(r"(?i)TODO: fix"),
        static_regex!(r"(?i)quick fix"),
        static_regex!(r"(?i)dirty"),
        static_regex!(r"(?i)\bwtf\b"),
        static_regex!(r"(?i)temporary solution"),
        static_regex!(r"(?i)don'?t touch"),
    ];
    for marker in hack_markers.iter().flatten() {
        if marker.is_match(code) {
            score += 20.0;
            signs.push("hack marker".to_string());
        }
    }

    // Dead code left in comments
    let commented_blocks = static_regex!(r"//\s*(const|let|var|function|if|return)\s+")
        .map(|re| re.find_iter(code).count())
        .unwrap_or(0);
    if commented_blocks > 2 {
        score += 25.0;
        signs.push("dead code artifacts".to_string());
    }

    // Mixed quote styles above the noise floor
    let single = code.matches('\'').count();
    let double = code.matches('"').count();
    if single > 5 && double > 5 {
        let ratio = single.min(double) as f64 / single.max(double) as f64;
        if ratio > 0.2 {
            score += 15.0;
            signs.push("inconsistent quotes".to_string());
        }
    }

    // Forgotten debug prints
    let debug_prints = [
        static_regex!(r#"console\.log\(['"]here['"]\)"#),
        static_regex!(r#"console\.log\(['"]test['"]\)"#),
        static_regex!(r#"console\.log\(['"]a{4,}['"]\)"#),
        static_regex!(r"\bdebugger;"),
    ];
    if debug_prints.iter().flatten().any(|re| re.is_match(code)) {
        score += 30.0;
        signs.push("debug leftovers".to_string());
    }

    signs.dedup();

    ChaosSignal {
        score: clamp_score(score),
        signs,
    }
}
