//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{ManagementClient, PaginationParams, RolesApi};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the tenant domain and a Management API token, checks the
/// token with a one-item listing and writes the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to the Auth0 CLI!".bold().green());
    println!("Let's connect to your tenant.\n");

    // Keep preferences from an existing config file
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let theme = ColorfulTheme::default();
    let mut prompt = Input::<String>::with_theme(&theme).with_prompt("Tenant domain");
    if let Some(domain) = config.domain.clone() {
        prompt = prompt.default(domain);
    }
    let domain = normalize_domain(&prompt.interact_text()?);

    let token: String = Password::with_theme(&theme)
        .with_prompt("Management API access token")
        .interact()?;

    println!("\n{}", "Verifying token...".cyan());
    let client = match opts.api_url_ref() {
        Some(url) => ManagementClient::with_base_url(url, token.clone())?,
        None => ManagementClient::new(&domain, token.clone())?,
    };
    client
        .list_roles(&PaginationParams::new().page_size(1))
        .await?;
    println!("{}", "✓ Token accepted!".green());

    config.domain = Some(domain);
    config.access_token = Some(token);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    if let Some(expires_at) = config.token_expires_at() {
        println!("  Token expires: {}", expires_at.to_rfc3339().bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "auth0 status".cyan());
    println!("  {} - List applications", "auth0 apps list".cyan());

    Ok(())
}

/// Strip a scheme and trailing slash from a pasted tenant URL.
fn normalize_domain(input: &str) -> String {
    input
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}
