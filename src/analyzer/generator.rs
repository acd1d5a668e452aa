//! Two-stage code generation from a requirements file
//!
//! Stage one asks for an analysis of the requirements, stage two asks for
//! code built from requirements plus that analysis.

use crate::ai::{prompts, CompletionGateway, SystemPrompt};
use crate::files::FileStore;
use crate::models::GeneratedCode;
use crate::status::StatusHandle;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{error, info};

/// Substring hints per language; the first language with any hit wins
const LANGUAGE_HINTS: &[(&str, &[&str])] = &[
    (
        "javascript",
        &["node", "javascript", "js", "react", "vue", "angular"],
    ),
    ("python", &["python", "django", "flask", "fastapi"]),
    ("typescript", &["typescript", "ts", "angular"]),
    ("java", &["java", "spring", "jakarta"]),
    ("csharp", &["c#", "csharp", ".net", "asp.net"]),
];
const DEFAULT_LANGUAGE: &str = "javascript";

fn code_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z0-9_+#-]*\n(.*?)```").expect("valid regex"))
}

pub struct CodeGenerator<'a, G: CompletionGateway + ?Sized> {
    store: &'a FileStore,
    gateway: &'a G,
    status: &'a StatusHandle,
}

impl<'a, G: CompletionGateway + ?Sized> CodeGenerator<'a, G> {
    pub fn new(store: &'a FileStore, gateway: &'a G, status: &'a StatusHandle) -> Self {
        Self {
            store,
            gateway,
            status,
        }
    }

    pub fn generate_from_requirements(&self, path: impl AsRef<Path>) -> Option<GeneratedCode> {
        let requirements = self.store.read_source(path)?;
        let language = detect_language(&requirements);
        info!("Generating {} code from requirements", language);

        self.status.start("Analyzing requirements...");
        let analysis = self.gateway.generate_completion(
            &prompts::requirements_analysis_prompt(&requirements),
            SystemPrompt::RequirementsAnalysis.text(),
        );
        let Some(analysis) = analysis else {
            self.status.stop(false, "Requirements analysis failed");
            error!("Requirements analysis failed");
            return None;
        };
        self.status.stop(true, "Requirements analyzed");

        self.status.start(format!("Generating {} code...", language));
        let response = self.gateway.generate_completion(
            &prompts::code_generation_prompt(language, &requirements, &analysis),
            SystemPrompt::ProductionCode.text(),
        );
        let Some(response) = response else {
            self.status.stop(false, "Code generation failed");
            error!("Code generation failed");
            return None;
        };
        self.status.stop(true, "Code generated");

        Some(GeneratedCode {
            code: extract_code_block(&response),
            analysis,
            language: language.to_string(),
        })
    }
}

/// First fenced code block, or the whole response when there is none
pub fn extract_code_block(response: &str) -> String {
    code_block()
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| response.trim().to_string())
}

/// Target language from keywords in the requirements.
///
/// Plain substring checks over the lowercased text. Short hints match inside
/// other words: "ts" hits "reports", "js" hits "json". Angular appears under
/// both javascript and typescript, so javascript takes it.
pub fn detect_language(requirements: &str) -> &'static str {
    let lower = requirements.to_lowercase();
    LANGUAGE_HINTS
        .iter()
        .find(|(_, hints)| hints.iter().any(|hint| lower.contains(hint)))
        .map(|(language, _)| *language)
        .unwrap_or(DEFAULT_LANGUAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedGateway;

    fn store_with(content: &str) -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("req.txt"), content).unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("A Python CLI that parses logs"), "python");
        assert_eq!(detect_language("Build it in TypeScript"), "typescript");
        assert_eq!(detect_language("Spring service in Java"), "java");
        assert_eq!(detect_language("JavaScript and Python both fine"), "javascript");
        assert_eq!(detect_language("A .NET csharp library"), "csharp");
        assert_eq!(detect_language("No language given"), "javascript");
    }

    #[test]
    fn test_detect_language_framework_hints() {
        assert_eq!(detect_language("A Django REST API for orders"), "python");
        assert_eq!(detect_language("A Flask microservice"), "python");
        assert_eq!(detect_language("Spring Boot service with Jakarta EE"), "java");
        assert_eq!(detect_language("A C# console app"), "csharp");
        assert_eq!(detect_language("An ASP.NET web api"), "csharp");
        assert_eq!(detect_language("A React dashboard"), "javascript");
        assert_eq!(detect_language("An Angular front end"), "javascript");
    }

    #[test]
    fn test_detect_language_short_hints_match_inside_words() {
        // "ts" inside "reports", "js" inside "json"
        assert_eq!(detect_language("Email the weekly reports"), "typescript");
        assert_eq!(detect_language("A Python tool that emits json"), "javascript");
    }

    #[test]
    fn test_extract_code_block() {
        let response = "Here you go:\n```python\nprint('a')\n```\nand\n```\nother\n```";
        assert_eq!(extract_code_block(response), "print('a')");
        assert_eq!(extract_code_block("  just code  "), "just code");
    }

    #[test]
    fn test_blank_requirements_skip_gateway() {
        let (_dir, store) = store_with("   \n");
        let gateway = ScriptedGateway::new(vec![Some("unused")]);
        let status = StatusHandle::hidden();

        let generator = CodeGenerator::new(&store, &gateway, &status);
        assert!(generator.generate_from_requirements("req.txt").is_none());
        assert!(generator.generate_from_requirements("missing.txt").is_none());
        assert_eq!(gateway.call_count(), 0);
    }

    #[test]
    fn test_two_stage_generation() {
        let (_dir, store) = store_with("A python tool that counts words");
        let gateway = ScriptedGateway::new(vec![
            Some("Needs a tokenizer."),
            Some("```python\ndef count(s):\n    return len(s.split())\n```"),
        ]);
        let status = StatusHandle::hidden();

        let out = CodeGenerator::new(&store, &gateway, &status)
            .generate_from_requirements("req.txt")
            .unwrap();

        assert_eq!(out.language, "python");
        assert_eq!(out.analysis, "Needs a tokenizer.");
        assert_eq!(out.code, "def count(s):\n    return len(s.split())");

        let calls = gateway.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, SystemPrompt::RequirementsAnalysis.text());
        assert!(calls[1].0.contains("Needs a tokenizer."));
        assert!(calls[1].0.contains("generate python code"));
        assert_eq!(calls[1].1, SystemPrompt::ProductionCode.text());
        assert!(!status.is_active());
    }

    #[test]
    fn test_failed_analysis_aborts() {
        let (_dir, store) = store_with("anything");
        let gateway = ScriptedGateway::new(vec![None, Some("never reached")]);
        let status = StatusHandle::hidden();

        assert!(CodeGenerator::new(&store, &gateway, &status)
            .generate_from_requirements("req.txt")
            .is_none());
        assert_eq!(gateway.call_count(), 1);
    }
}
