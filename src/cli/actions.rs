//! Handlers shared by the subcommands and the interactive menu
//!
//! Follow-up questions ("refactor?", "save?") go through a [`Prompter`], so
//! the same handler runs from flags or from dialoguer prompts.

use crate::ai::CompletionGateway;
use crate::analyzer::{CodeAnalyzer, CodeGenerator};
use crate::files::{self, FileStore, SourceInput};
use crate::metrics;
use crate::reporters::{self, markdown, terminal, OutputFormat};
use crate::scoring::ScoreBreakdown;
use crate::status::StatusHandle;
use anyhow::{anyhow, Result};
use console::style;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Refactor,
    AnalyzeRequirements,
    SaveCode,
    SaveReport,
}

impl Question {
    pub fn text(&self) -> &'static str {
        match self {
            Question::Refactor => "Would you like to see a refactored version of the code?",
            Question::AnalyzeRequirements => "Analyze the requirements before generating code?",
            Question::SaveCode => "Do you want to save the generated code?",
            Question::SaveReport => "Save this report as markdown?",
        }
    }
}

pub trait Prompter {
    fn confirm(&self, question: Question) -> Result<bool>;

    /// Name for a saved code file
    fn filename(&self) -> Result<String>;
}

/// Answers taken from command-line flags
#[derive(Debug, Default, Clone)]
pub struct FlagAnswers {
    pub refactor: bool,
    pub single_pass: bool,
    pub save: Option<String>,
    pub save_markdown: bool,
}

impl Prompter for FlagAnswers {
    fn confirm(&self, question: Question) -> Result<bool> {
        Ok(match question {
            Question::Refactor => self.refactor,
            Question::AnalyzeRequirements => !self.single_pass,
            Question::SaveCode => self.save.is_some(),
            Question::SaveReport => self.save_markdown,
        })
    }

    fn filename(&self) -> Result<String> {
        self.save
            .clone()
            .ok_or_else(|| anyhow!("No file name given (use --save NAME)"))
    }
}

pub struct Session<'a> {
    pub store: &'a FileStore,
    pub gateway: &'a dyn CompletionGateway,
    pub status: &'a StatusHandle,
}

fn load(store: &FileStore, path: &Path) -> Result<SourceInput> {
    files::load_source(store, path).ok_or_else(|| anyhow!("Failed to read file {}", path.display()))
}

impl<'a> Session<'a> {
    fn analyzer(&self) -> CodeAnalyzer<'a, dyn CompletionGateway + 'a> {
        CodeAnalyzer::new(self.gateway, self.status)
    }

    pub fn review(&self, path: &Path, prompter: &dyn Prompter) -> Result<()> {
        let source = load(self.store, path)?;
        info!("Analyzing {} file...", source.language);

        print!("{}", terminal::render_title("Code Review"));
        let analysis = self.analyzer().analyze_code(&source.text, &source.language);

        print!("{}", terminal::render_metrics(&analysis.metrics));
        print!("{}", terminal::render_patterns(&analysis.patterns));
        print!("{}", terminal::render_detailed(&analysis.detailed_text));

        // A failed review still offers a refactor of the original code
        if !prompter.confirm(Question::Refactor)? {
            return Ok(());
        }

        if let Some(refactored) =
            self.analyzer()
                .suggest_refactoring(&source.text, &source.language, &analysis)
        {
            print!(
                "{}",
                terminal::render_code("Refactored Code", &refactored, &source.language)
            );
            self.offer_save(&refactored, prompter)?;
        }
        Ok(())
    }

    pub fn generate(&self, path: &Path, prompter: &dyn Prompter) -> Result<()> {
        if prompter.confirm(Question::AnalyzeRequirements)? {
            let generated = CodeGenerator::new(self.store, self.gateway, self.status)
                .generate_from_requirements(path)
                .ok_or_else(|| anyhow!("Code generation from {} failed", path.display()))?;

            print!("{}", terminal::section("Requirements Analysis"));
            println!("{}", generated.analysis);
            print!(
                "{}",
                terminal::render_code("Generated Code", &generated.code, &generated.language)
            );
            return self.offer_save(&generated.code, prompter);
        }

        let requirements = self
            .store
            .read_source(path)
            .ok_or_else(|| anyhow!("Failed to read requirements file {}", path.display()))?;
        print!("{}", terminal::section("Code Generation"));
        info!("Requirements loaded");

        if let Some(code) = self.analyzer().generate_code(&requirements) {
            print!("{}", terminal::render_code("Generated Code", &code, "text"));
            self.offer_save(&code, prompter)?;
        }
        Ok(())
    }

    pub fn report(&self, path: &Path, prompter: &dyn Prompter) -> Result<()> {
        let source = load(self.store, path)?;
        info!("Generating analysis report for {} file...", source.language);

        print!("{}", terminal::render_title("Analysis Report"));
        let report = self
            .analyzer()
            .generate_analysis_report(&source.text, &source.language);

        print!("{}", terminal::render_patterns(&report.patterns));
        print!("{}", terminal::render_detailed(&report.detailed_text));

        if report.failed || !prompter.confirm(Question::SaveReport)? {
            return Ok(());
        }

        let heuristic = metrics::extract(&source.text);
        let content = markdown::render(&markdown::ReportInput {
            file_path: path,
            file_type: &source.language,
            analysis: &report.detailed_text,
            metrics: Some(&heuristic),
        });
        let saved = markdown::save(&self.store.reports_dir(), &content)?;
        println!("{} {}", style("Report saved to").green(), saved.display());
        Ok(())
    }

    fn offer_save(&self, code: &str, prompter: &dyn Prompter) -> Result<()> {
        if !prompter.confirm(Question::SaveCode)? {
            return Ok(());
        }
        let name = prompter.filename()?;
        if !self.store.save_code(code, &name) {
            return Err(anyhow!("Failed to save {}", name));
        }
        println!(
            "{} {}",
            style("Saved to").green(),
            self.store.output_dir().join(&name).display()
        );
        Ok(())
    }
}

/// Offline heuristic metrics for one file
pub fn metrics_report(
    store: &FileStore,
    path: &Path,
    format: OutputFormat,
    explain: bool,
) -> Result<String> {
    let source = load(store, path)?;
    let snapshot = metrics::extract(&source.text);
    let breakdown = explain.then(|| {
        ScoreBreakdown::compute(
            snapshot.complexity,
            snapshot.lines_of_code,
            snapshot.function_count,
            snapshot.class_count,
        )
    });

    reporters::render_metrics_report(
        &path.display().to_string(),
        &source.language,
        &snapshot,
        breakdown.as_ref(),
        format,
    )
}
