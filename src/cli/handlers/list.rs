//! Generic list command handler
//!
//! Provides a reusable pattern for list commands that follow the standard flow:
//! 1. Create command context
//! 2. Fetch one page, or walk every page up to the limit
//! 3. Convert to display type
//! 4. Print output

use std::future::Future;
use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs};
use crate::client::{ManagementClient, Page, PaginationParams, fetch_all};
use crate::error::Result;
use crate::output::Formattable;

/// Run a standard list command.
///
/// # Type Parameters
///
/// * `T` - The API model type returned by the fetcher (e.g., `Role`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
/// * `Fut` - The future type returned by the fetcher
///
/// # Example
///
/// ```ignore
/// run_list_command::<Role, RoleDisplay, _, _>(
///     opts,
///     pagination,
///     "roles",
///     |client, params| async move { client.list_roles(&params).await },
/// ).await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Page<T>>>,
    F: Fn(Arc<ManagementClient>, PaginationParams) -> Fut,
{
    let ctx = CommandContext::new(opts)?;

    debug!("Fetching {} from {}", resource_name, ctx.domain());

    let client = ctx.client.clone();
    let items = collect_items(pagination, ctx.page_size(), |params| {
        fetcher(client.clone(), params)
    })
    .await?;

    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(ctx.format)?;

    Ok(())
}

/// Fetch the requested page, or every page up to `--limit`.
pub async fn collect_items<T, Fut, F>(
    pagination: &PaginationArgs,
    page_size: usize,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    Fut: Future<Output = Result<Page<T>>>,
    F: FnMut(PaginationParams) -> Fut,
{
    match pagination.single_page(page_size) {
        Some(params) => Ok(fetch_page(params).await?.items),
        None => fetch_all(pagination.limit_or_all(), page_size, fetch_page).await,
    }
}
