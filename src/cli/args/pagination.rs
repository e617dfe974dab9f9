//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PaginationParams;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Fetch a single page (0-indexed) instead of walking all pages
    #[arg(long, short = 'p')]
    pub page: Option<usize>,
}

impl PaginationArgs {
    /// Params for a single-page request, or `None` to walk every page.
    pub fn single_page(&self, page_size: usize) -> Option<PaginationParams> {
        let page = self.page?;
        let size = self.limit.unwrap_or(page_size);
        Some(PaginationParams::new().page_size(size).page(page))
    }

    /// Item limit for a full walk; 0 means no limit.
    pub fn limit_or_all(&self) -> usize {
        self.limit.unwrap_or(0)
    }
}
