//! Vibescan - heuristic AI-authorship estimator
//!
//! Scores source files and repositories on how likely they are to have
//! been produced by a large language model. The estimate is built from
//! dozens of weak, independent signals (lexical patterns, structural
//! regularity, commit-history rhythm) fused into a bounded score with
//! an attached confidence. It is explicitly a best-effort heuristic,
//! not proof of authorship.
//!
//! # Pipeline
//!
//! ```text
//! files ──► dimensions (entropy, fingerprint, cognitive,   ──► fusion ──┐
//!           hallucination, chaos, stylistic)                            │
//! history ─► temporal analyzer ────────────────────────────────────────►│
//! files ──► cross-file coherence ──────────────────────────────────────►│
//!                                                            aggregate ─┴─► RepositoryReport
//! ```
//!
//! Per-file analysis is embarrassingly parallel; the engine fans out
//! over rayon. Every score leaving a public function is clamped to
//! [0, 100] and can never be NaN.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod crossfile;
pub mod dimensions;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod git;
pub mod models;
pub mod patterns;
pub mod reporters;
pub mod scoring;
pub mod temporal;
