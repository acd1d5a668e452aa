//! Doctor command - check environment

use crate::config::{AppConfig, UserConfig};
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn run(config: &AppConfig) -> Result<()> {
    println!("{}\n", style("codecritic doctor").bold());

    match UserConfig::user_config_path() {
        Some(path) if path.exists() => println!("✓ User config: {}", path.display()),
        Some(path) => println!("○ User config: {} (not found, defaults in use)", path.display()),
        None => println!("○ User config: no config directory on this platform"),
    }

    if Path::new(".env").exists() {
        println!("✓ .env file: found in working directory");
    } else {
        println!("○ .env file: none");
    }

    for warning in &config.warnings {
        println!("{} {}", style("!").yellow(), warning);
    }

    let backend = config.ai.backend;
    let key_ok = !backend.requires_api_key() || config.api_key().is_some();
    if key_ok {
        println!(
            "✓ AI backend: {} ({}, key {})",
            backend,
            config.ai.model(),
            config.masked_key()
        );
    } else {
        println!(
            "✗ AI backend: {} - {} is not set",
            backend,
            backend.env_key().unwrap_or("API key")
        );
        println!("  Get a key at {}", backend.signup_url());
        println!("  Offline commands (metrics, example) still work.");
    }

    if key_ok {
        println!("\n{}", style("All checks passed!").green());
    } else {
        println!("\n{}", style("Some checks failed.").yellow());
    }
    Ok(())
}
