//! # Showcase CLI (`showcase`)
//!
//! ## Usage
//!
//! ```bash
//! showcase --config ./config/showcase.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `showcase serve` | Start the HTTP server |
//! | `showcase cases [--id <id>]` | Print case cards, or one case in full |
//! | `showcase capabilities [--id <id> [--outline]]` | Print capabilities, one capability, or its outline |
//! | `showcase groups [--query <q> \| --tag <label>]` | Capabilities sorted into purpose groups |
//! | `showcase category <id-or-name>` | One category with related-category extras |
//! | `showcase search [<query>] [--recent <n>] [--clear] [--history <file>]` | Search groups |
//! | `showcase categories` | Category catalog, purposes and departments |
//!
//! ## Examples
//!
//! ```bash
//! # Serve with credentials from the environment
//! MICROCMS_SERVICE_DOMAIN=ideal MICROCMS_API_KEY=... showcase serve
//!
//! # Try the catalog offline
//! SHOWCASE_USE_MOCK_DATA=true showcase groups
//!
//! # Search, remembering queries between runs
//! showcase search "議事録" --history ~/.showcase-history.json
//! showcase search --recent 0 --history ~/.showcase-history.json
//! ```

use clap::{Parser, Subcommand};
use showcase::{commands, config, logging, server};
use std::path::PathBuf;

/// Showcase: AI case studies and capability listings backed by a headless CMS.
#[derive(Parser)]
#[command(name = "showcase", version)]
struct Cli {
    /// Path to configuration file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = "./config/showcase.toml")]
    config: PathBuf,

    /// Debug logging for this crate.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Print case studies.
    Cases {
        /// Fetch one case with every detail field.
        #[arg(long)]
        id: Option<String>,
    },

    /// Print AI capabilities.
    Capabilities {
        #[arg(long)]
        id: Option<String>,

        /// Print the detail page outline (headings, difficulty) instead.
        #[arg(long, requires = "id")]
        outline: bool,
    },

    /// Show capabilities sorted into purpose groups.
    Groups {
        /// Only groups matching this free-text query.
        #[arg(long, short)]
        query: Option<String>,

        /// Search a popular tag's keywords, e.g. `翻訳`.
        #[arg(long, conflicts_with = "query")]
        tag: Option<String>,
    },

    /// Show one category, padded with items from related categories.
    Category {
        /// Category id (`document_creation`) or display name (`文書作成・管理`).
        id: String,
    },

    /// Search purpose groups.
    ///
    /// Without a query or `--recent`, prints the stored history.
    Search {
        query: Option<String>,

        /// Re-run the n-th most recent query (0 = newest).
        #[arg(long, conflicts_with = "query")]
        recent: Option<usize>,

        /// Forget every stored query.
        #[arg(long, requires = "history", conflicts_with_all = ["query", "recent"])]
        clear: bool,

        /// JSON file holding recent queries.
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// List the category catalog.
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Needs no config or network.
    if let Commands::Categories = cli.command {
        return commands::run_categories();
    }

    let cfg = config::load_config(&cli.config)?;
    logging::init_logging(&cfg.log, cli.verbose);

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Cases { id } => {
            commands::run_cases(&cfg, id.as_deref()).await?;
        }
        Commands::Capabilities { id, outline } => {
            commands::run_capabilities(&cfg, id.as_deref(), outline).await?;
        }
        Commands::Groups { query, tag } => {
            commands::run_groups(&cfg, query.as_deref(), tag.as_deref()).await?;
        }
        Commands::Category { id } => {
            commands::run_category(&cfg, &id).await?;
        }
        Commands::Search {
            query,
            recent,
            clear,
            history,
        } => match history.as_deref() {
            Some(path) if clear => commands::run_clear_history(path)?,
            _ => commands::run_search(&cfg, query.as_deref(), recent, history.as_deref()).await?,
        },
        Commands::Categories => commands::run_categories()?,
    }

    Ok(())
}
