//! Per-file fusion engine
//!
//! Combines the six dimension signals into one score/confidence pair
//! per file. Fusion is rule-based and additive: each dimension
//! contributes a fixed bump (or its own raw score) to a base of zero,
//! confidence starts at 50 and rises with corroborating evidence, and
//! chaos evidence is subtracted in full. Two dimensions can force the
//! final confidence outright: a strong model fingerprint (95) or
//! strong human chaos (90).
//!
//! Generated and vendored files are excluded before any dimension
//! runs: a marker in the leading lines short-circuits to score 0,
//! confidence 100, verdict `Excluded`.

use std::collections::BTreeMap;

use crate::config::AnalyzerConfig;
use crate::dimensions::{
    analyze_chaos, analyze_cognitive, analyze_entropy, analyze_fingerprint,
    analyze_hallucination, replay_patterns,
};
use crate::formatter::FormatterInfo;
use crate::models::{clamp_score, FileAnalysis, ScoreBreakdown, SourceFile, Verdict};

/// True when the leading lines carry a generator or vendoring marker.
pub fn is_generated(content: &str, config: &AnalyzerConfig) -> bool {
    content
        .lines()
        .take(config.fusion.generated_marker_window)
        .any(|line| {
            let lowered = line.to_lowercase();
            config
                .generated_markers
                .iter()
                .any(|marker| lowered.contains(&marker.to_lowercase()))
        })
}

fn excluded(file: &SourceFile) -> FileAnalysis {
    FileAnalysis {
        path: file.path.clone(),
        score: 0.0,
        confidence: 100.0,
        verdict: Verdict::Excluded,
        dimensions: BTreeMap::new(),
        breakdown: ScoreBreakdown::default(),
        patterns: Vec::new(),
        reasons: vec!["generated or vendored file".to_string()],
        human_signs: Vec::new(),
        line_count: file.content.lines().count(),
    }
}

/// Score one file. Infallible: dimension-internal failures degrade to
/// zero contributions, never to an error.
pub fn score_file(
    file: &SourceFile,
    formatter: &FormatterInfo,
    config: &AnalyzerConfig,
) -> FileAnalysis {
    if is_generated(&file.content, config) {
        return excluded(file);
    }

    let code = file.content.as_str();
    let entropy = analyze_entropy(code, config);
    let fingerprint = analyze_fingerprint(code, config);
    let cognitive = analyze_cognitive(code, config);
    let hallucination = analyze_hallucination(code, config);
    let chaos = analyze_chaos(code, config);
    let stylistic = replay_patterns(code, &file.path, formatter, config);

    let mut score = 0.0;
    let mut confidence = 50.0;
    let mut reasons = Vec::new();
    let mut breakdown = ScoreBreakdown::default();

    // Structure: entropy regularity and complexity anomalies
    if entropy.low_entropy {
        score += 25.0;
        breakdown.structure += 25.0;
        reasons.push("unnaturally uniform code structure".to_string());
    } else if entropy.score > 0.0 {
        score += 10.0;
        breakdown.structure += 10.0;
        reasons.push("mildly regular code structure".to_string());
    }
    if cognitive.is_academic {
        score += 20.0;
        breakdown.structure += 20.0;
        reasons.push("textbook guard-clause style".to_string());
    }
    if cognitive.abstraction_count > 0 && cognitive.complexity < 5 {
        score += 15.0;
        breakdown.structure += 15.0;
        reasons.push("premature abstraction over trivial logic".to_string());
    }

    // Lexical: model accent and pattern replay
    score += fingerprint.score;
    breakdown.lexical += fingerprint.score;
    if fingerprint.score > 0.0 {
        confidence += 30.0;
        if let Some(model) = fingerprint.detected {
            reasons.push(format!(
                "{model} signature ({} matches)",
                fingerprint.max_matches
            ));
        }
    }
    let stylistic_contribution = stylistic.contribution(
        config.fusion.stylistic_normalizer,
        config.fusion.stylistic_cap,
    );
    if stylistic_contribution > 0.0 {
        score += stylistic_contribution;
        breakdown.lexical += stylistic_contribution;
        reasons.push(format!(
            "{} stylistic pattern(s) triggered",
            stylistic.hits.len()
        ));
    }

    // Behavior: phantom declarations
    if hallucination.score > 0.0 {
        score += hallucination.score;
        breakdown.behavior += hallucination.score;
        reasons.push(format!(
            "{} dead reference(s) found",
            hallucination.ghosts.len()
        ));
    }

    // Context: human mess is exonerating and subtracted in full
    if chaos.score > 0.0 {
        score -= chaos.score;
        breakdown.context -= chaos.score;
        confidence += 20.0;
    }

    // Strong single-dimension evidence overrides the accumulated
    // confidence in either direction.
    if fingerprint.score > 50.0 {
        confidence = 95.0;
    } else if chaos.score > 50.0 {
        confidence = 90.0;
    }

    let score = clamp_score(score);
    let confidence = clamp_score(confidence);

    let mut dimensions = BTreeMap::new();
    dimensions.insert("entropy".to_string(), entropy.as_result());
    dimensions.insert("fingerprint".to_string(), fingerprint.as_result());
    dimensions.insert("cognitive".to_string(), cognitive.as_result());
    dimensions.insert("hallucination".to_string(), hallucination.as_result());
    dimensions.insert("chaos".to_string(), chaos.as_result());
    dimensions.insert(
        "stylistic".to_string(),
        stylistic.as_result(
            config.fusion.stylistic_normalizer,
            config.fusion.stylistic_cap,
        ),
    );

    FileAnalysis {
        path: file.path.clone(),
        score,
        confidence,
        verdict: Verdict::from_score(score, confidence),
        dimensions,
        breakdown,
        patterns: stylistic.hits,
        reasons,
        human_signs: chaos.signs,
        line_count: file.content.lines().count(),
    }
}
