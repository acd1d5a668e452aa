//! codecritic - LLM-assisted code review in the terminal
//!
//! Heuristic metrics and a weighted score are computed locally; reviews,
//! reports, refactoring and code generation go through a chat completion
//! endpoint behind the [`ai::CompletionGateway`] trait.

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod files;
pub mod metrics;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod status;
