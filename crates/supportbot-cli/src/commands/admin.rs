//! Operator subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;
use supportbot_core::catalog::{CatalogManager, RECENT_TICKET_LIMIT, parse_field_list};
use supportbot_core::confirm::Outcome;
use supportbot_core::export;
use supportbot_core::ticket::TicketStatus;

use crate::confirm::PromptConfirmer;
use crate::context::AppContext;

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List products with their fields and issue counts
    List,
    /// Add a product
    Add {
        name: String,
        /// Comma-separated identity fields, e.g. "Email, Order ID"
        #[arg(long)]
        fields: String,
    },
    /// Change a product's name or fields (its key stays the same)
    Edit {
        key: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        fields: Option<String>,
    },
    /// Delete a product and all of its issues
    Delete {
        key: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum IssueCommand {
    /// List issues, for one product or all
    List { product_key: Option<String> },
    /// Add an issue, or replace one with the same name
    Add {
        product_key: String,
        name: String,
        /// Solution steps: repeat the flag once per step, or pass a single
        /// value with "\n" between steps
        #[arg(long, required = true)]
        solution: Vec<String>,
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete an issue by its number in `issue list`
    Delete {
        product_key: String,
        number: usize,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TicketCommand {
    /// Show the most recent tickets
    List,
    /// Delete every ticket
    Clear {
        #[arg(long, short)]
        yes: bool,
    },
    /// Write the ticket log as CSV
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DataCommand {
    /// Write products, issues and tickets as JSON
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Delete all products, issues and tickets
    Reset {
        #[arg(long, short)]
        yes: bool,
    },
}

/// Opens the catalog from the durable store, warning if it had to start empty.
pub fn open_manager(ctx: &AppContext) -> CatalogManager {
    let manager = CatalogManager::new(ctx.repository.clone());
    if let Some(err) = manager.load_error() {
        eprintln!(
            "{}",
            format!("Warning: stored data could not be read and was reset: {}", err).yellow()
        );
    }
    manager
}

pub fn product(manager: &mut CatalogManager, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::List => list_products(manager),
        ProductCommand::Add { name, fields } => {
            let result = manager.upsert_product(&name, &parse_field_list(&fields))?;
            success(&format!("Product '{}' {}", result.key, result.action));
        }
        ProductCommand::Edit { key, name, fields } => {
            let product = manager.begin_edit(&key)?;
            let name = name.unwrap_or_else(|| product.name.clone());
            let fields = match fields {
                Some(text) => parse_field_list(&text),
                None => product.fields.clone(),
            };
            let result = manager.upsert_product(&name, &fields)?;
            success(&format!("Product '{}' {}", result.key, result.action));
        }
        ProductCommand::Delete { key, yes } => {
            match manager.delete_product(&key, &PromptConfirmer::new(yes))? {
                Outcome::Applied(product) => {
                    success(&format!("Deleted product '{}' and its issues", product.name))
                }
                Outcome::Cancelled => cancelled(),
                Outcome::NoOp => note(&format!("No product with key '{}'", key)),
            }
        }
    }
    Ok(())
}

pub fn issue(manager: &mut CatalogManager, command: IssueCommand) -> Result<()> {
    match command {
        IssueCommand::List { product_key } => list_issues(manager, product_key.as_deref())?,
        IssueCommand::Add {
            product_key,
            name,
            solution,
            yes,
        } => {
            let solution = solution_text(&solution);
            match manager.upsert_issue(&product_key, &name, &solution, &PromptConfirmer::new(yes))? {
                Outcome::Applied(action) => success(&format!("Issue '{}' {}", name.trim(), action)),
                Outcome::Cancelled => cancelled(),
                Outcome::NoOp => {}
            }
        }
        IssueCommand::Delete {
            product_key,
            number,
            yes,
        } => {
            let outcome = match number.checked_sub(1) {
                Some(index) => {
                    manager.delete_issue(&product_key, index, &PromptConfirmer::new(yes))?
                }
                None => Outcome::NoOp,
            };
            match outcome {
                Outcome::Applied(issue) => success(&format!("Deleted issue '{}'", issue.name)),
                Outcome::Cancelled => cancelled(),
                Outcome::NoOp => note(&format!(
                    "Product '{}' has no issue #{}",
                    product_key, number
                )),
            }
        }
    }
    Ok(())
}

pub fn ticket(manager: &mut CatalogManager, command: TicketCommand) -> Result<()> {
    match command {
        TicketCommand::List => list_tickets(manager),
        TicketCommand::Clear { yes } => match manager.clear_tickets(&PromptConfirmer::new(yes))? {
            Outcome::Applied(count) => success(&format!("Cleared {} ticket(s)", count)),
            Outcome::Cancelled => cancelled(),
            Outcome::NoOp => {}
        },
        TicketCommand::Export { output } => {
            let csv = export::tickets_csv(manager.tickets())?;
            let path = output.unwrap_or_else(|| export::tickets_export_filename(Utc::now()).into());
            write_export(&path, &csv)?;
        }
    }
    Ok(())
}

pub fn data(manager: &mut CatalogManager, command: DataCommand) -> Result<()> {
    match command {
        DataCommand::Export { output } => {
            let now = Utc::now();
            let json = export::snapshot_json(manager.data(), now)?;
            let path = output.unwrap_or_else(|| export::snapshot_export_filename(now).into());
            write_export(&path, &json)?;
        }
        DataCommand::Reset { yes } => match manager.reset_all(&PromptConfirmer::new(yes))? {
            Outcome::Applied(()) => success("All data has been reset"),
            Outcome::Cancelled => cancelled(),
            Outcome::NoOp => {}
        },
    }
    Ok(())
}

// ============================================================================
// Listings
// ============================================================================

fn list_products(manager: &CatalogManager) {
    let summaries = manager.product_summaries();
    if summaries.is_empty() {
        note("No products configured yet.");
        return;
    }

    for summary in summaries {
        println!(
            "{} {}",
            summary.name.bold(),
            format!("[{}]", summary.key).bright_black()
        );
        println!("  Fields: {}", summary.fields.join(", "));
        println!("  Issues: {}", summary.issue_count);
    }
}

fn list_issues(manager: &CatalogManager, product_key: Option<&str>) -> Result<()> {
    let keys: Vec<String> = match product_key {
        Some(key) => {
            manager
                .product(key)
                .with_context(|| format!("No product with key '{}'", key))?;
            vec![key.to_string()]
        }
        None => manager.data().products.keys().cloned().collect(),
    };

    if keys.is_empty() {
        note("No products configured yet.");
        return Ok(());
    }

    for key in keys {
        let name = manager
            .product(&key)
            .map(|product| product.name.as_str())
            .unwrap_or_default();
        println!("{} {}", name.bold(), format!("[{}]", key).bright_black());

        let issues = manager.issues_for(&key);
        if issues.is_empty() {
            println!("  {}", "No issues configured for this product.".bright_black());
        }
        for (number, issue) in issues.iter().enumerate() {
            println!("  {} {}", format!("{}.", number + 1).yellow(), issue.name);
            for step in &issue.solution {
                println!("     - {}", step);
            }
        }
    }
    Ok(())
}

fn list_tickets(manager: &CatalogManager) {
    let total = manager.tickets().len();
    if total == 0 {
        note("No support tickets yet.");
        return;
    }

    let recent = manager.recent_tickets(RECENT_TICKET_LIMIT);
    println!(
        "{}",
        format!("Showing {} of {} ticket(s), newest first", recent.len(), total).bright_black()
    );
    for ticket in recent {
        let status = match ticket.status {
            TicketStatus::Resolved => ticket.status.to_string().green(),
            TicketStatus::Escalated => ticket.status.to_string().yellow(),
        };
        println!(
            "{} {} {}",
            format!("#{}", ticket.id).bold(),
            status,
            ticket.timestamp.bright_black()
        );
        println!("  Product:  {}", ticket.product_name);
        println!("  Customer: {}", ticket.customer_summary(", "));
        println!("  Issue:    {}", ticket.issue);
    }
}

// ============================================================================
// Output helpers
// ============================================================================

fn write_export(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("[Admin] Exported to {}", path.display());
    success(&format!("Exported to {}", path.display()));
    Ok(())
}

/// Joins `--solution` values into newline-separated text.
///
/// Escaped `\n` sequences are expanded only when a single value was given;
/// with repeated flags every value is one step, taken literally.
fn solution_text(values: &[String]) -> String {
    match values {
        [single] => single.replace("\\n", "\n"),
        steps => steps.join("\n"),
    }
}

fn success(message: &str) {
    println!("{}", message.green());
}

fn cancelled() {
    println!("{}", "Cancelled.".bright_black());
}

fn note(message: &str) {
    println!("{}", message.bright_black());
}
