//! Per-file dimension detectors
//!
//! Six independent analyzers, each consuming only the file's text and
//! producing a bounded sub-score plus supporting detail. They share no
//! state and may run concurrently; the fusion engine in `scoring` is
//! the only consumer of their outputs.
//!
//! Polarity: five dimensions score AI evidence (higher = more
//! machine-like); `chaos` scores human evidence and is subtracted
//! during fusion.

pub mod chaos;
pub mod cognitive;
pub mod entropy;
pub mod fingerprint;
pub mod hallucination;
pub mod stylistic;

pub use chaos::{analyze_chaos, ChaosSignal};
pub use cognitive::{analyze_cognitive, CognitiveSignal};
pub use entropy::{analyze_entropy, EntropySignal};
pub use fingerprint::{analyze_fingerprint, FingerprintSignal};
pub use hallucination::{analyze_hallucination, HallucinationSignal};
pub use stylistic::{replay_patterns, StylisticSignal};
