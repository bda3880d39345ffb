//! Legacy-stylistic dimension
//!
//! Replays the full pattern library (plus any applicable language
//! packs) against the file and sums `count x effective_weight` per
//! pattern. The raw total is compressed into a bounded contribution
//! by the fusion engine; this module only gathers the evidence.

use crate::config::AnalyzerConfig;
use crate::formatter::FormatterInfo;
use crate::models::{DimensionResult, PatternHit};
use crate::patterns::{self, Pattern};
use serde::Serialize;

/// Raw stylistic evidence: every triggered pattern with its
/// discounted contribution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StylisticSignal {
    /// Signed sum of all contributions; not yet normalized.
    pub raw_total: f64,
    pub hits: Vec<PatternHit>,
}

impl StylisticSignal {
    pub fn as_result(&self, normalizer: f64, cap: f64) -> DimensionResult {
        DimensionResult::new(self.contribution(normalizer, cap), self)
    }

    /// Bounded positive contribution to the fused score.
    pub fn contribution(&self, normalizer: f64, cap: f64) -> f64 {
        (self.raw_total / normalizer).clamp(0.0, cap)
    }
}

fn replay_set(
    set: &'static [Pattern],
    code: &str,
    formatter: &FormatterInfo,
    signal: &mut StylisticSignal,
) {
    for pattern in set {
        let count = (pattern.detect)(code);
        if count == 0 {
            continue;
        }
        let mut weight = pattern.weight;
        if !pattern.immune_to_formatting && formatter.has_formatter {
            weight *= formatter.weight_multiplier;
        }
        let contribution = count as f64 * weight;
        signal.raw_total += contribution;
        signal.hits.push(PatternHit {
            id: pattern.id.to_string(),
            name: pattern.name.to_string(),
            count,
            weight,
            contribution,
        });
    }
}

/// Run the general catalog plus the packs for this file's language.
pub fn replay_patterns(
    code: &str,
    path: &str,
    formatter: &FormatterInfo,
    config: &AnalyzerConfig,
) -> StylisticSignal {
    let mut signal = StylisticSignal::default();
    replay_set(patterns::catalog(), code, formatter, &mut signal);
    for pack in patterns::packs_for(config.language_for(path), path) {
        replay_set(pack, code, formatter, &mut signal);
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_produces_no_hits() {
        let config = AnalyzerConfig::default();
        let signal = replay_patterns("let x = 1;\n", "a.js", &FormatterInfo::none(), &config);
        assert!(signal.hits.is_empty());
        assert_eq!(signal.raw_total, 0.0);
    }

    #[test]
    fn emoji_heavy_comments_accumulate() {
        let config = AnalyzerConfig::default();
        let code = "// done ✅\n// fixed ✅\n// shipping 🚀\n";
        let signal = replay_patterns(code, "a.js", &FormatterInfo::none(), &config);
        assert!(signal.raw_total > 0.0);
        assert!(signal.hits.iter().any(|h| h.id == "emoji-checkmarks"));
    }

    #[test]
    fn formatter_discount_applies_to_sensitive_patterns_only() {
        let config = AnalyzerConfig::default();
        // perfect-consistency is formatting-sensitive
        let code = "\"a\" \"b\" \"c\" \"d\" \"e\" \"f\"";
        let plain = replay_patterns(code, "a.js", &FormatterInfo::none(), &config);
        let formatted = FormatterInfo {
            has_formatter: true,
            configs_found: vec![".prettierrc".into()],
            weight_multiplier: config.formatting_discount,
        };
        let discounted = replay_patterns(code, "a.js", &formatted, &config);

        let hit = |s: &StylisticSignal| {
            s.hits
                .iter()
                .find(|h| h.id == "perfect-consistency")
                .map(|h| h.weight)
        };
        let full = hit(&plain).expect("pattern should fire");
        let reduced = hit(&discounted).expect("pattern should fire");
        assert!(reduced < full);
        assert!((reduced - full * config.formatting_discount).abs() < 1e-9);
    }

    #[test]
    fn human_markers_drive_total_negative() {
        let config = AnalyzerConfig::default();
        let code = "// damn hack\n// this is dirty shit\nconsole.log(\"here\");\n";
        let signal = replay_patterns(code, "a.js", &FormatterInfo::none(), &config);
        assert!(signal.raw_total < 0.0);
        // And the fused contribution floors at zero rather than going negative
        assert_eq!(signal.contribution(5.0, 40.0), 0.0);
    }

    #[test]
    fn language_pack_hits_are_included() {
        let config = AnalyzerConfig::default();
        let code = "async function a() { await b(); }\n".repeat(4);
        let signal = replay_patterns(&code, "src/api.js", &FormatterInfo::none(), &config);
        assert!(signal.hits.iter().any(|h| h.id == "js-async-await-only"));
    }
}
