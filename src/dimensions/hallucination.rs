//! Hallucination / dead-reference dimension
//!
//! Generated code declares things "just in case": imports that are
//! never used, variables assigned once and never read again. This is
//! a textual approximation, not a parse - shadowed or re-exported
//! names can false-positive. That imprecision is accepted; the signal
//! is weighted accordingly.

use crate::config::AnalyzerConfig;
use crate::models::{clamp_score, DimensionResult};
use crate::patterns::static_regex;
use regex::Regex;
use serde::Serialize;

/// Evidence of phantom declarations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HallucinationSignal {
    pub score: f64,
    /// Human-readable descriptions of each ghost found.
    pub ghosts: Vec<String>,
}

impl HallucinationSignal {
    pub fn as_result(&self) -> DimensionResult {
        DimensionResult::new(self.score, self)
    }
}

/// Case-sensitive identifier-boundary search.
fn is_used(name: &str, text: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(name))) {
        Ok(re) => re.is_match(text),
        // Unbuildable probe counts as used - never accuse on a failure
        Err(_) => true,
    }
}

pub fn analyze_hallucination(code: &str, _config: &AnalyzerConfig) -> HallucinationSignal {
    let mut score = 0.0;
    let mut ghosts = Vec::new();

    // Strip import lines so an import can't "use" itself
    let body: String = code
        .lines()
        .filter(|l| !l.trim_start().starts_with("import ") && !l.trim_start().starts_with("from "))
        .collect::<Vec<_>>()
        .join("\n");

    // Unused imports: named `{ A, B }` and default `C` forms
    if let Some(re) = static_regex!(r"import\s+(?:\{\s*([\w,\s]+)\s*\}|(\w+))\s+from") {
        for caps in re.captures_iter(code) {
            let mut names: Vec<String> = Vec::new();
            if let Some(named) = caps.get(1) {
                names.extend(
                    named
                        .as_str()
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty()),
                );
            }
            if let Some(default) = caps.get(2) {
                names.push(default.as_str().to_string());
            }
            for name in names {
                if !is_used(&name, &body) {
                    score += 15.0;
                    ghosts.push(format!("unused import: {name}"));
                }
            }
        }
    }

    // Single-assignment declarations never read afterwards
    if let Some(re) = static_regex!(r"const\s+(\w+)\s*=\s*[^;]+;") {
        for caps in re.captures_iter(code) {
            let name = &caps[1];
            let end = caps.get(0).map(|m| m.end()).unwrap_or(code.len());
            let rest = &code[end..];
            if !is_used(name, rest) {
                score += 10.0;
                ghosts.push(format!("unused variable: {name}"));
            }
        }
    }

    HallucinationSignal {
        score: clamp_score(score),
        ghosts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_import_is_a_ghost() {
        let config = AnalyzerConfig::default();
        let code = "import { render, hydrate } from 'react-dom';\nrender(app);\n";
        let signal = analyze_hallucination(code, &config);
        assert_eq!(signal.score, 15.0);
        assert_eq!(signal.ghosts, vec!["unused import: hydrate"]);
    }

    #[test]
    fn used_default_import_is_clean() {
        let config = AnalyzerConfig::default();
        let code = "import axios from 'axios';\nconst r = await axios.get(url);\nuse(r);\n";
        let signal = analyze_hallucination(code, &config);
        assert!(signal.ghosts.iter().all(|g| !g.contains("axios")));
    }

    #[test]
    fn unused_const_is_a_ghost() {
        let config = AnalyzerConfig::default();
        let code = "const result = await service.call();\nreturn [];\n";
        let signal = analyze_hallucination(code, &config);
        assert_eq!(signal.score, 10.0);
        assert_eq!(signal.ghosts, vec!["unused variable: result"]);
    }

    #[test]
    fn reuse_after_declaration_is_clean() {
        let config = AnalyzerConfig::default();
        let code = "const total = sum(xs);\nconsole.log(total);\n";
        let signal = analyze_hallucination(code, &config);
        assert_eq!(signal.score, 0.0);
    }

    #[test]
    fn score_is_clamped() {
        let config = AnalyzerConfig::default();
        let mut code = String::new();
        for i in 0..20 {
            code.push_str(&format!("import {{ ghost{i} }} from 'm{i}';\n"));
        }
        let signal = analyze_hallucination(&code, &config);
        assert_eq!(signal.score, 100.0);
    }
}
