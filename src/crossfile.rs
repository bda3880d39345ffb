//! Cross-file coherence analysis
//!
//! A human codebase varies: one file is dense, another chatty, a third
//! barely commented. Machine output is statistically flat. This module
//! measures the spread of three per-file metrics across the scanned
//! set and treats low spread as AI evidence. Needs at least two files;
//! below that it returns a not-applicable result.

use crate::config::AnalyzerConfig;
use crate::models::{clamp_score, Consistency, CrossFileAnalysis, SourceFile};
use crate::patterns::static_regex;

#[derive(Debug, Clone, Copy)]
struct FileMetrics {
    avg_line_length: f64,
    comment_ratio: f64,
    naming_verbosity: f64,
    indent_width: usize,
}

pub fn analyze_coherence(files: &[SourceFile], config: &AnalyzerConfig) -> CrossFileAnalysis {
    if files.len() < 2 {
        return CrossFileAnalysis::not_applicable();
    }

    let metrics: Vec<FileMetrics> = files.iter().map(|f| file_metrics(&f.content)).collect();

    let mut score = 0.0;
    let c = &config.crossfile;

    if stddev(metrics.iter().map(|m| m.avg_line_length)) < c.line_length_stddev {
        score += c.metric_increment;
    }
    if stddev(metrics.iter().map(|m| m.comment_ratio)) < c.comment_ratio_stddev {
        score += c.metric_increment;
    }
    if stddev(metrics.iter().map(|m| m.naming_verbosity)) < c.naming_stddev {
        score += c.metric_increment;
    }

    // One indent width everywhere is normal under a linter, so it
    // carries less weight and only applies to larger sets.
    let mut widths: Vec<usize> = metrics.iter().map(|m| m.indent_width).collect();
    widths.sort_unstable();
    widths.dedup();
    if widths.len() == 1 && files.len() > c.indent_min_files {
        score += c.indent_increment;
    }

    let score = clamp_score(score);
    CrossFileAnalysis {
        score,
        consistency: if score > 50.0 {
            Consistency::Suspicious
        } else {
            Consistency::Normal
        },
    }
}

fn file_metrics(code: &str) -> FileMetrics {
    FileMetrics {
        avg_line_length: avg_line_length(code),
        comment_ratio: comment_ratio(code),
        naming_verbosity: naming_verbosity(code),
        indent_width: indent_width(code),
    }
}

fn avg_line_length(code: &str) -> f64 {
    let lines: Vec<&str> = code.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return 0.0;
    }
    lines.iter().map(|l| l.chars().count()).sum::<usize>() as f64 / lines.len() as f64
}

fn comment_ratio(code: &str) -> f64 {
    let mut comments = 0usize;
    let mut code_lines = 0usize;
    for line in code.lines() {
        let t = line.trim();
        if t.starts_with("//") || t.starts_with("/*") || t.starts_with('*') {
            comments += 1;
        } else if !t.is_empty() {
            code_lines += 1;
        }
    }
    if code_lines == 0 {
        0.0
    } else {
        comments as f64 / code_lines as f64
    }
}

/// Mean identifier length across the file.
fn naming_verbosity(code: &str) -> f64 {
    let Some(re) = static_regex!(r"\b[a-zA-Z_]\w*\b") else {
        return 0.0;
    };
    let mut total = 0usize;
    let mut count = 0usize;
    for word in re.find_iter(code) {
        total += word.as_str().chars().count();
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Width of the first indented line; 4 when nothing is indented.
fn indent_width(code: &str) -> usize {
    static_regex!(r"\n( +)\S")
        .and_then(|re| re.captures(code))
        .map(|caps| caps[1].len())
        .unwrap_or(4)
}

fn stddev(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> SourceFile {
        SourceFile::new(path, content)
    }

    #[test]
    fn single_file_is_not_applicable() {
        let config = AnalyzerConfig::default();
        let files = [file("a.js", "const a = 1;\n")];
        let analysis = analyze_coherence(&files, &config);
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.consistency, Consistency::NotApplicable);
    }

    #[test]
    fn identical_files_are_suspicious() {
        let config = AnalyzerConfig::default();
        let body = "\
function process(input) {
    // normalize the payload
    const normalized = input.trim();
    return normalized;
}
";
        let files: Vec<SourceFile> = (0..7)
            .map(|i| file(&format!("src/m{i}.js"), body))
            .collect();
        let analysis = analyze_coherence(&files, &config);
        // Three flat metrics (75) plus uniform indentation (10)
        assert_eq!(analysis.score, 85.0);
        assert_eq!(analysis.consistency, Consistency::Suspicious);
    }

    #[test]
    fn varied_files_read_as_normal() {
        let config = AnalyzerConfig::default();
        let files = [
            file("a.js", "x\n"),
            file(
                "b.js",
                "// heavily documented module with long explanatory prose lines\n// more commentary\nconst configurationRegistry = buildConfigurationRegistry();\n",
            ),
            file("c.js", "if(a){b()}\n\tq();\n"),
        ];
        let analysis = analyze_coherence(&files, &config);
        assert!(analysis.score <= 50.0);
        assert_eq!(analysis.consistency, Consistency::Normal);
    }

    #[test]
    fn uniform_indent_needs_a_large_set() {
        let config = AnalyzerConfig::default();
        let body = "function f() {\n  return 1;\n}\n";
        let small: Vec<SourceFile> = (0..3)
            .map(|i| file(&format!("m{i}.js"), body))
            .collect();
        let large: Vec<SourceFile> = (0..8)
            .map(|i| file(&format!("m{i}.js"), body))
            .collect();
        let small_score = analyze_coherence(&small, &config).score;
        let large_score = analyze_coherence(&large, &config).score;
        assert_eq!(large_score - small_score, config.crossfile.indent_increment);
    }
}
