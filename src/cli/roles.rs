//! Role commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{PaginationArgs, RolesCommands};
use crate::client::{Role, RolesApi};
use crate::error::Result;
use crate::models::RoleDisplay;

pub async fn run(command: &RolesCommands, opts: &GlobalOptions) -> Result<()> {
    match command {
        RolesCommands::List { pagination } => list(opts, pagination).await,
    }
}

/// Run the `roles list` command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    run_list_command::<Role, RoleDisplay, _, _>(
        opts,
        pagination,
        "roles",
        |client, params| async move { client.list_roles(&params).await },
    )
    .await
}
