//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Auth0 CLI Configuration Status".bold());

    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "auth0 init".cyan()
            );
            println!();
            return Ok(());
        }
    };

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    match config.domain.as_deref() {
        Some(domain) if !domain.is_empty() => {
            println!("{} Tenant domain: {}", "✓".green(), domain)
        }
        _ => {
            println!("{} Tenant domain not configured", "✗".red());
            println!("  → Run 'auth0 init' to configure");
        }
    }

    if config.access_token.as_deref().is_none_or(str::is_empty) {
        println!("{} Access token not configured", "✗".red());
        println!("  → Run 'auth0 init' to configure");
    } else {
        match config.token_expires_at() {
            Some(expires_at) if expires_at < Utc::now() => {
                println!("{} Access token expired", "⚠".yellow());
                println!("  → Run 'auth0 init' to store a new one");
            }
            Some(expires_at) => {
                let remaining = expires_at.signed_duration_since(Utc::now());
                println!(
                    "{} Access token valid (expires in {}h {}m)",
                    "✓".green(),
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            }
            None => println!("{} Access token configured (expiry unknown)", "○".dimmed()),
        }
    }

    if let Some(url) = opts.api_url_ref() {
        println!("{} Custom API URL: {}", "○".dimmed(), url.cyan());
    }
    println!(
        "{} Page size: {}",
        "○".dimmed(),
        config.preferences.page_size
    );
    println!();

    Ok(())
}
