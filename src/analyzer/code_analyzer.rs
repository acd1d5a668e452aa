//! Review, refactoring, single-pass generation and report requests

use crate::ai::{prompts, CompletionGateway, SystemPrompt};
use crate::analyzer::merge::{self, ModelReport, ANALYSIS_PLACEHOLDERS, REPORT_PLACEHOLDERS};
use crate::metrics;
use crate::models::{AnalysisReport, CodeAnalysis};
use crate::status::StatusHandle;
use tracing::{error, info};

pub struct CodeAnalyzer<'a, G: CompletionGateway + ?Sized> {
    gateway: &'a G,
    status: &'a StatusHandle,
}

impl<'a, G: CompletionGateway + ?Sized> CodeAnalyzer<'a, G> {
    pub fn new(gateway: &'a G, status: &'a StatusHandle) -> Self {
        Self { gateway, status }
    }

    /// One gateway round-trip wrapped in the spinner
    fn request(&self, prompt: &str, system: SystemPrompt) -> Option<String> {
        self.status
            .start(format!("Connecting to {}...", self.gateway.describe()));
        let response = self.gateway.generate_completion(prompt, system.text());
        match &response {
            Some(_) => self.status.stop(true, "Connected successfully"),
            None => self.status.stop(false, "Connection failed"),
        }
        response
    }

    /// Review code: heuristic metrics overlaid with whatever the model reports.
    ///
    /// Returns [`CodeAnalysis::failed`] when the gateway gives no answer.
    pub fn analyze_code(&self, code: &str, language: &str) -> CodeAnalysis {
        let prompt = prompts::analysis_prompt(code, language);
        let Some(response) = self.request(&prompt, SystemPrompt::Analysis) else {
            error!("Analysis failed: no response from {}", self.gateway.describe());
            return CodeAnalysis::failed();
        };

        let heuristic = metrics::extract(code);
        let model = ModelReport::parse(&response);

        CodeAnalysis {
            metrics: merge::merge_metrics(heuristic, &model),
            patterns: merge::merge_patterns(&model, &ANALYSIS_PLACEHOLDERS),
            detailed_text: response,
            failed: false,
        }
    }

    pub fn suggest_refactoring(
        &self,
        code: &str,
        language: &str,
        analysis: &CodeAnalysis,
    ) -> Option<String> {
        let prompt = prompts::refactoring_prompt(code, language, &analysis.summary());
        let refactored = self.request(&prompt, SystemPrompt::Refactoring);
        if refactored.is_none() {
            error!("Refactoring failed");
        }
        refactored
    }

    /// Single-pass code generation from plain-text requirements
    pub fn generate_code(&self, requirements: &str) -> Option<String> {
        info!("Starting code generation with plain text requirements");
        let prompt = prompts::generation_prompt(requirements);
        let generated = self.request(&prompt, SystemPrompt::Generation);
        match &generated {
            Some(code) => tracing::debug!("Generated {} chars of code", code.len()),
            None => error!("Code generation failed"),
        }
        generated
    }

    /// Full written report with pattern lists.
    ///
    /// Returns [`AnalysisReport::failed`] when the gateway gives no answer.
    pub fn generate_analysis_report(&self, code: &str, language: &str) -> AnalysisReport {
        let prompt = prompts::report_prompt(code, language);
        let Some(response) = self.request(&prompt, SystemPrompt::Report) else {
            error!("Report generation failed: no response from {}", self.gateway.describe());
            return AnalysisReport::failed();
        };

        let model = ModelReport::parse(&response);
        AnalysisReport {
            patterns: merge::merge_patterns(&model, &REPORT_PLACEHOLDERS),
            detailed_text: response,
            failed: false,
        }
    }
}
