//! Import command: converge the tenant to a YAML declaration

use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, ImportArgs, OutputFormat};
use crate::error::{Error, Result};
use crate::import::{
    Confirmer, ImportConfig, ImportOutcome, Keywords, PlannedChanges, Reconciler, Reporter,
    TenantDeclaration, run_import,
};
use crate::models::ImportChangesDisplay;
use crate::output::{json, table};

/// Run the import command
///
/// The policy file and the declaration are validated before the CLI config
/// is read, so input mistakes are reported without touching the network.
pub async fn run(args: &ImportArgs, opts: &GlobalOptions) -> Result<()> {
    let policy = ImportConfig::load(&args.config)?;
    let keywords = Keywords::new(policy.replacements()?);
    if keywords.is_empty() {
        debug!("No keyword mappings configured");
    }
    let declaration = TenantDeclaration::load(&args.input, &keywords)?;
    debug!(
        "Declaration: {} clients, {} resource servers, {} roles",
        declaration.clients.len(),
        declaration.resource_servers.len(),
        declaration.roles.len()
    );

    let ctx = CommandContext::new(opts)?;
    let domains = reserved_domains(ctx.domain(), policy.domain.as_deref());
    info!("Importing {} into {}", args.input, ctx.domain());

    if args.dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
    }

    let reporter = ConsoleReporter::new();
    let confirmer = DialoguerConfirmer;
    let reconciler = Reconciler::new(&reporter, &confirmer)
        .allow_delete(policy.allow_delete)
        .dry_run(args.dry_run)
        .assume_yes(args.yes)
        .page_size(ctx.page_size());

    let outcome = run_import(ctx.client.as_ref(), &declaration, &domains, &reconciler).await?;

    println!("{}", render_summary(&outcome, ctx.format, args.dry_run)?);
    if outcome.cancelled {
        eprintln!("Cancelled.");
    }

    Ok(())
}

/// Domains whose Management API must survive the import: the tenant the
/// client writes to, plus `AUTH0_DOMAIN` when the policy names another one.
fn reserved_domains<'a>(tenant: &'a str, policy_domain: Option<&'a str>) -> Vec<&'a str> {
    let mut domains = vec![tenant];
    if let Some(domain) = policy_domain.filter(|d| !d.is_empty() && *d != tenant) {
        domains.push(domain);
    }
    domains
}

/// Render the per-kind summary in the selected format.
fn render_summary(outcome: &ImportOutcome, format: OutputFormat, dry_run: bool) -> Result<String> {
    let rows: Vec<ImportChangesDisplay> = outcome
        .changes
        .iter()
        .cloned()
        .map(ImportChangesDisplay::from)
        .collect();

    match format {
        OutputFormat::Table => Ok(table::format_counts_table(
            &rows,
            ImportChangesDisplay::FIRST_COUNT_COLUMN,
        )),
        OutputFormat::Json => Ok(json::format_json(&rows)?),
        OutputFormat::Pretty => Ok(pretty_summary(&rows, dry_run)),
    }
}

fn pretty_summary(rows: &[ImportChangesDisplay], dry_run: bool) -> String {
    if rows.is_empty() {
        return "Nothing imported.".to_string();
    }

    let heading = if dry_run {
        "Planned changes"
    } else {
        "Import complete"
    };
    let mut lines = vec![heading.bold().to_string()];
    for row in rows {
        let marker = if row.total() == 0 {
            "○".dimmed()
        } else {
            "✓".green()
        };
        lines.push(format!(
            "{} {:<14} {} created, {} updated, {} deleted",
            marker, row.resource, row.creates, row.updates, row.deletes
        ));
    }
    lines.join("\n")
}

/// Spinner while listing, one stderr line per mutation.
struct ConsoleReporter {
    interactive: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
            spinner: Mutex::new(None),
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Reporter for ConsoleReporter {
    fn loading(&self, what: &str) {
        if !self.interactive {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{}...", what));
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn loaded(&self) {
        if let Some(spinner) = self.take_spinner() {
            spinner.finish_and_clear();
        }
    }

    fn mutation(&self, line: &str) {
        eprintln!("{}", line);
    }

    fn planned(&self, plan: &PlannedChanges) {
        eprintln!("\n{}", plan.resource.bold());
        if plan.creates.is_empty() && plan.updates.is_empty() && plan.deletes.is_empty() {
            eprintln!("  {}", "no changes".dimmed());
            return;
        }
        for key in &plan.creates {
            eprintln!("  {} {}", "+".green(), key);
        }
        for (key, fields) in &plan.updates {
            eprintln!("  {} {} ({})", "~".yellow(), key, fields.join(", "));
        }
        for key in &plan.deletes {
            eprintln!("  {} {}", "-".red(), key);
        }
    }
}

/// Asks on the terminal before deleting anything.
struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm_deletes(&self, kind: &str, keys: &[String]) -> Result<bool> {
        if !std::io::stdin().is_terminal() {
            return Err(Error::Other(format!(
                "{} {} would be deleted; pass --yes to confirm without a terminal",
                keys.len(),
                kind
            )));
        }

        eprintln!("\nThe following {} will be deleted:", kind);
        for key in keys {
            eprintln!("  {} {}", "-".red(), key);
        }

        Ok(Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?)
    }
}
