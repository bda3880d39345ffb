//! Entropy/regularity dimension
//!
//! Humans produce ragged line lengths and uneven spacing; generated
//! code tends toward robotic regularity. This dimension measures the
//! variance of per-line length and the uniformity of blank-line gap
//! sizes. Short files carry no entropy signal and return neutral.

use crate::config::AnalyzerConfig;
use crate::models::{clamp_score, DimensionResult};
use serde::Serialize;

/// Evidence extracted by the entropy analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntropySignal {
    pub score: f64,
    pub low_entropy: bool,
    pub variance: f64,
    pub spacing_uniformity: f64,
    pub paren_ratio: f64,
}

impl EntropySignal {
    pub fn as_result(&self) -> DimensionResult {
        DimensionResult::new(self.score, self)
    }
}

pub fn analyze_entropy(code: &str, config: &AnalyzerConfig) -> EntropySignal {
    let thresholds = &config.entropy;
    let non_blank: Vec<&str> = code.lines().filter(|l| !l.trim().is_empty()).collect();
    if non_blank.is_empty() {
        return EntropySignal::default();
    }

    // Variance of line lengths
    let lengths: Vec<f64> = non_blank.iter().map(|l| l.len() as f64).collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let variance =
        lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;

    // Blank-line gap sizes between code blocks
    let mut gaps = Vec::new();
    let mut current_gap = 0usize;
    for line in code.lines() {
        if line.trim().is_empty() {
            current_gap += 1;
        } else if current_gap > 0 {
            gaps.push(current_gap);
            current_gap = 0;
        }
    }

    // Too few samples to say anything about spacing discipline
    if gaps.len() < thresholds.min_gap_samples {
        return EntropySignal {
            variance,
            ..EntropySignal::default()
        };
    }

    let mut counts = std::collections::HashMap::new();
    let mut max_count = 0usize;
    for gap in &gaps {
        let c = counts.entry(*gap).or_insert(0usize);
        *c += 1;
        max_count = max_count.max(*c);
    }
    let spacing_uniformity = max_count as f64 / gaps.len() as f64;

    // Parenthesis overload: (a && b) where a && b would do
    let paren_count = code.chars().filter(|c| *c == '(' || *c == ')').count();
    let paren_ratio = paren_count as f64 / non_blank.len() as f64;

    let low_entropy =
        variance < thresholds.low_variance && non_blank.len() > thresholds.min_lines;
    let robotic_spacing = spacing_uniformity > thresholds.spacing_uniformity;

    let mut score = 0.0;
    if low_entropy {
        score += 40.0;
    }
    if robotic_spacing {
        score += 30.0;
    }
    if paren_ratio > thresholds.paren_ratio {
        score += 10.0;
    }

    EntropySignal {
        score: clamp_score(score),
        low_entropy,
        variance,
        spacing_uniformity,
        paren_ratio,
    }
}
