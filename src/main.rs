//! auth0 CLI - Auth0 Management API client with declarative tenant import

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod import;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` turns on debug output for this crate; otherwise `RUST_LOG`
/// applies with a `warn` default.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match &cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("auth0 version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Import(args) => cli::import::run(args, &opts).await,
        Commands::Apps(cmd) => cli::apps::run(cmd, &opts).await,
        Commands::Apis(cmd) => cli::apis::run(cmd, &opts).await,
        Commands::Roles(cmd) => cli::roles::run(cmd, &opts).await,
        Commands::Completion { shell } => {
            cli::completions::run(*shell);
            Ok(())
        }
    }
}
