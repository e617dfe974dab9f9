//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod apis;
pub mod apps;
pub mod args;
pub mod completions;
pub mod context;
pub mod handlers;
pub mod import;
pub mod init;
pub mod roles;
pub mod status;

pub use args::{OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// auth0 - command-line client for the Auth0 Management API
#[derive(Parser, Debug)]
#[command(name = "auth0")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "AUTH0_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "AUTH0_CLI_CONFIG", hide_env = true)]
    pub config_file: Option<String>,

    /// Override the Management API base URL
    #[arg(long, global = true, env = "AUTH0_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "AUTH0_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store the tenant domain and Management API token
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Converge the tenant to a YAML declaration
    Import(ImportArgs),

    /// Manage applications
    #[command(subcommand)]
    Apps(AppsCommands),

    /// Manage APIs (resource servers)
    #[command(subcommand)]
    Apis(ApisCommands),

    /// Manage roles
    #[command(subcommand)]
    Roles(RolesCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   auth0 completion bash > /etc/bash_completion.d/auth0
  zsh:    auth0 completion zsh > \"${fpath[1]}/_auth0\"
  fish:   auth0 completion fish > ~/.config/fish/completions/auth0.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `auth0 import`
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// JSON file with AUTH0_DOMAIN, AUTH0_KEYWORD_REPLACE_MAPPINGS and AUTH0_ALLOW_DELETE
    #[arg(long, short = 'c')]
    pub config: String,

    /// YAML tenant declaration (clients, resourceServers, roles)
    #[arg(long, short = 'i')]
    pub input: String,

    /// Show what would change without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the delete confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Application subcommands
#[derive(Subcommand, Debug)]
pub enum AppsCommands {
    /// List applications in the tenant
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// API subcommands
#[derive(Subcommand, Debug)]
pub enum ApisCommands {
    /// List APIs in the tenant
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// Role subcommands
#[derive(Subcommand, Debug)]
pub enum RolesCommands {
    /// List roles in the tenant
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
}
