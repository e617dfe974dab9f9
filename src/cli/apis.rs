//! API (resource server) commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{ApisCommands, PaginationArgs};
use crate::client::{ResourceServer, ResourceServersApi};
use crate::error::Result;
use crate::models::ApiDisplay;

pub async fn run(command: &ApisCommands, opts: &GlobalOptions) -> Result<()> {
    match command {
        ApisCommands::List { pagination } => list(opts, pagination).await,
    }
}

/// Run the `apis list` command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    run_list_command::<ResourceServer, ApiDisplay, _, _>(
        opts,
        pagination,
        "APIs",
        |client, params| async move { client.list_resource_servers(&params).await },
    )
    .await
}
