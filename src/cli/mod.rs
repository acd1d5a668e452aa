//! CLI command definitions and handlers

mod actions;
mod doctor;
mod interactive;

pub use actions::{metrics_report, FlagAnswers, Prompter, Question, Session};

use crate::config::{AppConfig, UserConfig};
use crate::files::FileStore;
use crate::reporters::OutputFormat;
use crate::status::StatusHandle;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::str::FromStr;

/// codecritic - LLM-assisted code review in the terminal
#[derive(Parser, Debug)]
#[command(name = "codecritic")]
#[command(
    version,
    about = "LLM-assisted code review: metrics, pattern reports, refactoring and code generation",
    long_about = "codecritic sends a source file to a chat completion API and shows the answer as a \
metrics table, pattern lists and a detailed report. It can also refactor code, generate code \
from a requirements file, and save markdown reports.\n\n\
Run without a subcommand for the interactive menu.",
    after_help = "\
Examples:
  codecritic                                   Interactive menu
  codecritic review src/app.js --refactor      Review and refactor a file
  codecritic generate requirements.txt --save app.py
  codecritic report src/app.js --save-markdown
  codecritic metrics src/app.js --format json  Offline heuristic metrics

Set OPENAI_API_KEY (or put it in .env) before using the AI commands."
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Hide the progress spinner
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default)
    Interactive,

    /// Review a code file: metrics, patterns and a detailed report
    Review {
        /// File to review (.ipynb notebooks are reduced to their code cells)
        file: PathBuf,

        /// Also ask for a refactored version
        #[arg(long)]
        refactor: bool,

        /// Save the refactored code under the output directory
        #[arg(long, value_name = "NAME", requires = "refactor")]
        save: Option<String>,
    },

    /// Generate code from a plain-text requirements file
    Generate {
        /// Requirements file
        file: PathBuf,

        /// Skip the requirements analysis stage
        #[arg(long)]
        single_pass: bool,

        /// Save the generated code under the output directory
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },

    /// Full analysis report with pattern lists
    Report {
        /// File to analyze
        file: PathBuf,

        /// Also write the report as markdown under the reports directory
        #[arg(long)]
        save_markdown: bool,
    },

    /// Heuristic metrics only (offline, no API key needed)
    Metrics {
        /// File to measure
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Show the sub-scores behind the overall score
        #[arg(long)]
        explain: bool,
    },

    /// Write an example JavaScript file to the output directory
    Example,

    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check configuration and API key setup
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create the user config file with example settings
    Init,
    /// Show effective settings and config paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load();
    let root = std::env::current_dir().context("Failed to determine working directory")?;
    let store = config.file_store(&root);
    let status = if cli.quiet {
        StatusHandle::hidden()
    } else {
        StatusHandle::new()
    };

    match cli.command {
        Some(Commands::Metrics {
            file,
            format,
            explain,
        }) => {
            let format = OutputFormat::from_str(&format)?;
            print!("{}", metrics_report(&store, &file, format, explain)?);
            if format == OutputFormat::Json {
                println!();
            }
            Ok(())
        }

        Some(Commands::Example) => {
            let name = store
                .create_example_file()
                .context("Failed to create example file")?;
            println!(
                "{} {}",
                style("Example file created:").green(),
                store.output_dir().join(name).display()
            );
            Ok(())
        }

        Some(Commands::Config { action }) => run_config_action(action, &config),

        Some(Commands::Doctor) => doctor::run(&config),

        Some(Commands::Review {
            file,
            refactor,
            save,
        }) => {
            let flags = FlagAnswers {
                refactor,
                save,
                ..Default::default()
            };
            with_session(&config, &store, &status, |session| {
                session.review(&file, &flags)
            })
        }

        Some(Commands::Generate {
            file,
            single_pass,
            save,
        }) => {
            let flags = FlagAnswers {
                single_pass,
                save,
                ..Default::default()
            };
            with_session(&config, &store, &status, |session| {
                session.generate(&file, &flags)
            })
        }

        Some(Commands::Report {
            file,
            save_markdown,
        }) => {
            let flags = FlagAnswers {
                save_markdown,
                ..Default::default()
            };
            with_session(&config, &store, &status, |session| {
                session.report(&file, &flags)
            })
        }

        Some(Commands::Interactive) | None => {
            with_session(&config, &store, &status, interactive::run)
        }
    }
}

/// Build the completion client and run `f`; a missing key is fatal
fn with_session(
    config: &AppConfig,
    store: &FileStore,
    status: &StatusHandle,
    f: impl FnOnce(&Session<'_>) -> Result<()>,
) -> Result<()> {
    let client = config.client()?;
    let session = Session {
        store,
        gateway: &client,
        status,
    };
    f(&session)
}

fn run_config_action(action: ConfigAction, config: &AppConfig) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("{} {}", style("Config file:").green(), path.display());
            println!("\nEdit it to add your API key, or set it via environment:");
            println!("  export OPENAI_API_KEY=\"sk-...\"");
            Ok(())
        }
        ConfigAction::Show => {
            println!("Config paths:");
            if let Some(path) = UserConfig::user_config_path() {
                let state = if path.exists() { "✓" } else { "(not found)" };
                println!("  User: {} {}", path.display(), state);
            }
            let env_state = if std::path::Path::new(".env").exists() {
                "✓"
            } else {
                "(not found)"
            };
            println!("  Env:  ./.env {}", env_state);
            println!();
            for (key, value) in config.display_lines() {
                println!("  {:<12} {}", key, value);
            }
            Ok(())
        }
    }
}
