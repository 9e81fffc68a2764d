//! Stepcart CLI - configurator authoring and publishing tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a definition file
//! stepcart validate gift-box.json
//!
//! # Render the page body without publishing
//! stepcart render gift-box.json -o gift-box.html
//!
//! # Manage published configurators
//! stepcart configurators list
//! stepcart configurators publish gift-box.json
//! stepcart configurators update 108828000 gift-box.json
//! stepcart configurators delete 108828000
//! ```
//!
//! # Commands
//!
//! - `validate` - Check a definition file offline
//! - `render` - Render a definition file offline
//! - `configurators` - List, show, publish, update and delete configurator pages

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use stepcart_admin::repository::{DEFAULT_PAGE_SIZE, Direction};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "stepcart")]
#[command(author, version, about = "Stepcart configurator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a definition file
    Validate {
        /// Definition JSON file
        file: PathBuf,
    },
    /// Render a definition file to the page body it would publish
    Render {
        /// Definition JSON file
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage published configurators
    Configurators {
        #[command(subcommand)]
        action: ConfiguratorAction,
    },
}

#[derive(Subcommand)]
enum ConfiguratorAction {
    /// List configurators one page at a time
    List {
        /// Cursor from a previous listing
        #[arg(long)]
        cursor: Option<String>,

        /// Which way to walk from the cursor
        #[arg(long, value_enum, default_value_t = DirectionArg::Next)]
        direction: DirectionArg,

        /// Configurators per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: i64,
    },
    /// Show a configurator's definition
    Show {
        /// Numeric page id
        id: u64,
    },
    /// Publish a definition file as a new configurator
    Publish {
        /// Definition JSON file
        file: PathBuf,
    },
    /// Overwrite a configurator with a definition file
    Update {
        /// Numeric page id
        id: u64,
        /// Definition JSON file
        file: PathBuf,
    },
    /// Delete a configurator
    Delete {
        /// Numeric page id
        id: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    /// Pages after the cursor (use `nextCursor`)
    Next,
    /// Pages before the cursor (use `prev_cursor`)
    Prev,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Next => Self::Next,
            DirectionArg::Prev => Self::Prev,
        }
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepcart=info,stepcart_admin=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Validate { file } => commands::definition::validate(&file, &mut out)?,
        Commands::Render { file, output } => {
            commands::definition::render(&file, output.as_deref(), &mut out)?;
        }
        Commands::Configurators { action } => {
            let repository = commands::configurators::repository_from_env()?;
            match action {
                ConfiguratorAction::List {
                    cursor,
                    direction,
                    page_size,
                } => {
                    let request = commands::configurators::list_request(
                        cursor,
                        direction.into(),
                        page_size,
                    );
                    commands::configurators::list(&repository, request, &mut out).await?;
                }
                ConfiguratorAction::Show { id } => {
                    commands::configurators::show(&repository, id, &mut out).await?;
                }
                ConfiguratorAction::Publish { file } => {
                    commands::configurators::publish(&repository, &file, &mut out).await?;
                }
                ConfiguratorAction::Update { id, file } => {
                    commands::configurators::update(&repository, id, &file, &mut out).await?;
                }
                ConfiguratorAction::Delete { id } => {
                    commands::configurators::delete(&repository, id, &mut out).await?;
                }
            }
        }
    }
    Ok(())
}
