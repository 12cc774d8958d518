//! Runtime orchestrator: runs the review analysis pipeline.
//!
//! Sentiment fill, corpus-wide keyword extraction, theme classification,
//! per-bank insight synthesis and the cross-bank comparison, in that order.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
