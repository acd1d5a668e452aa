//! Interactive menu session

use super::actions::{self, Prompter, Question, Session};
use crate::reporters::{terminal, OutputFormat};
use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::PathBuf;

const MENU: &[&str] = &[
    "Review Code File",
    "Generate Code from Requirements",
    "Generate Analysis Report",
    "Heuristic Metrics",
    "Exit",
];

/// Follow-up questions asked on the terminal
struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, question: Question) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(question.text())
            .default(true)
            .interact()?)
    }

    fn filename(&self) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt("Enter filename to save the code")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Filename is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?
            .trim()
            .to_string())
    }
}

impl DialoguerPrompter {
    fn path(&self, prompt: &str) -> Result<PathBuf> {
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("File path is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(PathBuf::from(input.trim()))
    }
}

/// Menu loop; a failed action is reported and the menu comes back
pub fn run(session: &Session<'_>) -> Result<()> {
    let prompter = DialoguerPrompter {
        theme: ColorfulTheme::default(),
    };

    print!("{}", terminal::render_title("codecritic"));
    println!(
        "{}\n",
        style(format!("Connected to {}", session.gateway.describe())).dim()
    );

    loop {
        let choice = Select::with_theme(&prompter.theme)
            .with_prompt("What would you like to do?")
            .items(MENU)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => prompter
                .path("Enter the path to the code file to review")
                .and_then(|p| session.review(&p, &prompter)),
            1 => prompter
                .path("Enter the path to the requirements file")
                .and_then(|p| session.generate(&p, &prompter)),
            2 => prompter
                .path("Enter the path to the code file to analyze")
                .and_then(|p| session.report(&p, &prompter)),
            3 => prompter
                .path("Enter the path to the code file")
                .and_then(|p| actions::metrics_report(session.store, &p, OutputFormat::Text, true))
                .map(|out| print!("{}", out)),
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        };

        if let Err(e) = result {
            tracing::error!("Operation failed: {:#}", e);
        }
    }
}
