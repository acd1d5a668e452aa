//! Orchestration of gateway requests
//!
//! [`CodeAnalyzer`] runs one gateway call per request and merges any
//! structured values in the reply over the heuristic metrics.
//! [`CodeGenerator`] runs the two-stage requirements pipeline.

mod code_analyzer;
mod generator;
pub mod merge;

pub use code_analyzer::CodeAnalyzer;
pub use generator::{detect_language, extract_code_block, CodeGenerator};
pub use merge::ModelReport;
