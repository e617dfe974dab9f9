//! Application commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{AppsCommands, PaginationArgs};
use crate::client::{Application, ClientsApi};
use crate::error::Result;
use crate::models::AppDisplay;

pub async fn run(command: &AppsCommands, opts: &GlobalOptions) -> Result<()> {
    match command {
        AppsCommands::List { pagination } => list(opts, pagination).await,
    }
}

/// Run the `apps list` command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    run_list_command::<Application, AppDisplay, _, _>(
        opts,
        pagination,
        "applications",
        |client, params| async move { client.list_clients(&params).await },
    )
    .await
}
