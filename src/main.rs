use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tabclip_lib::bootstrap::{config::resolve_system_config, tracing::init_tracing_subscriber};
use tabclip_lib::commands::{self, FocusTarget, ListArgs, PasteArgs};

#[derive(Parser)]
#[command(name = "tabclip")]
#[command(about = "Clipboard history with snippets and paste-last", long_about = None)]
struct Cli {
    /// Config file (defaults to config.toml in the app data directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy text in a page, as if the user pressed the copy shortcut
    Copy {
        text: String,
        /// URL of the page the text was copied from
        #[arg(short, long, default_value = "")]
        url: String,
    },
    /// Show the history, newest first
    List {
        /// Favorites only
        #[arg(short, long)]
        favorites: bool,
        /// Case-insensitive filter over text and url
        #[arg(short, long)]
        search: Option<String>,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one or more items by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Toggle the favorite flag of an item
    Favorite { id: String },
    /// Save a snippet: copying KEY records TEXT instead
    Snippet { key: String, text: String },
    /// Write the history as pretty JSON
    Backup {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace the history from a backup file
    Restore {
        /// Input file ("-" for stdin)
        r#in: PathBuf,
    },
    /// Paste the newest item into the active tab
    PasteLast {
        /// What has focus in the tab
        #[arg(short, long, value_enum, default_value_t = FocusTarget::Textarea)]
        focus: FocusTarget,
        /// Current value of the focused field
        #[arg(long, default_value = "")]
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = resolve_system_config(cli.config)?;
    if let Err(err) = init_tracing_subscriber(&config.logs_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    match cli.command {
        Commands::Copy { text, url } => commands::copy(&config, &text, &url).await,
        Commands::List {
            favorites,
            search,
            json,
        } => {
            commands::list(
                &config,
                ListArgs {
                    favorites,
                    search,
                    json,
                },
            )
            .await
        }
        Commands::Delete { ids } => commands::delete(&config, ids).await,
        Commands::Favorite { id } => commands::favorite(&config, id).await,
        Commands::Snippet { key, text } => commands::snippet(&config, &key, &text).await,
        Commands::Backup { out } => commands::backup(&config, out).await,
        Commands::Restore { r#in } => commands::restore(&config, r#in).await,
        Commands::PasteLast { focus, value } => {
            commands::paste_last(&config, PasteArgs { focus, value }).await
        }
    }
}
