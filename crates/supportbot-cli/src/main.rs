use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod confirm;
mod context;
mod logging;
mod render;

use commands::admin::{DataCommand, IssueCommand, ProductCommand, TicketCommand};
use context::AppContext;

#[derive(Parser)]
#[command(name = "supportbot", version)]
#[command(about = "Customer support chatbot with an operator console", long_about = None)]
struct Cli {
    /// Path to config.toml (default: the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the store and logs (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a customer chat session
    Chat,
    /// Manage products, issues, tickets and stored data
    Admin {
        #[command(subcommand)]
        target: AdminTarget,
    },
}

#[derive(Subcommand)]
enum AdminTarget {
    /// Products and their identity fields
    Product {
        #[command(subcommand)]
        action: ProductCommand,
    },
    /// Known issues and their solutions
    Issue {
        #[command(subcommand)]
        action: IssueCommand,
    },
    /// The support ticket log
    Ticket {
        #[command(subcommand)]
        action: TicketCommand,
    },
    /// Export or reset everything
    Data {
        #[command(subcommand)]
        action: DataCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = AppContext::load(cli.config, cli.data_dir)?;
    let _log_guard = logging::init(&ctx.paths.logs_dir(), &ctx.config.logging.level)?;
    tracing::info!(
        "[Bootstrap] supportbot v{} using data dir {}",
        env!("CARGO_PKG_VERSION"),
        ctx.paths.data_dir().display()
    );

    match cli.command {
        Commands::Chat => commands::chat::run(&ctx).await?,
        Commands::Admin { target } => {
            let mut manager = commands::admin::open_manager(&ctx);
            match target {
                AdminTarget::Product { action } => {
                    commands::admin::product(&mut manager, action)?
                }
                AdminTarget::Issue { action } => commands::admin::issue(&mut manager, action)?,
                AdminTarget::Ticket { action } => commands::admin::ticket(&mut manager, action)?,
                AdminTarget::Data { action } => commands::admin::data(&mut manager, action)?,
            }
        }
    }

    Ok(())
}
