use std::path::PathBuf;

use anyhow::Result;
use chrono::DateTime;
use clap::{Parser, Subcommand};

use crate::history::HistoryStore;
use crate::idjump::{self, InputKind};
use crate::remote::{ClientConfig, SuggestClient, search_url};
use crate::storage::FileStore;
use crate::suggest::{StateHandle, SuggestFetcher};

#[derive(Parser)]
#[command(name = "bili-suggest")]
#[command(version = "0.1.0")]
#[command(about = "Search suggestions, id jumps and local history for the bilibili search box", long_about = None)]
pub struct Cli {
    /// Directory for history storage (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch suggestions for a search term
    Suggest { term: String },
    /// Classify input as an id reference or a plain query
    Classify { text: String },
    /// Inspect or edit the stored search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print stored queries, newest first
    List,
    /// Delete one stored query by its exact text
    Remove { value: String },
    /// Delete all stored queries
    Clear,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = match &cli.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location()?,
    };
    let mut history = HistoryStore::new(store);

    match cli.command {
        Commands::Suggest { term } => {
            let client = SuggestClient::new(ClientConfig::default())?;
            let fetcher = SuggestFetcher::new(client, StateHandle::new());
            fetcher.refresh(&term, history.list()).await;

            let state = fetcher.state().borrow();
            if state.items.is_empty() {
                println!("No suggestions");
            }
            for item in &state.items {
                if item.markup == item.value {
                    println!("{}", item.value);
                } else {
                    println!("{}\t{}", item.value, item.markup);
                }
            }
        }
        Commands::Classify { text } => {
            let kind = idjump::classify(&text);
            match &kind {
                InputKind::Av { aid } => {
                    println!("av id {aid}");
                }
                InputKind::Bv { bvid } => {
                    println!("BV id {bvid}");
                }
                InputKind::Query(term) => {
                    println!("plain query: {term}");
                }
            }
            let target = kind.link().unwrap_or_else(|| search_url(&text));
            println!("target: {target}");
        }
        Commands::History { action } => match action {
            HistoryAction::List => {
                let entries = history.list();
                if entries.is_empty() {
                    println!("No search history");
                }
                for entry in entries {
                    let when = DateTime::from_timestamp_millis(entry.timestamp)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| entry.timestamp.to_string());
                    println!("{when}  {}", entry.value);
                }
            }
            HistoryAction::Remove { value } => {
                history.remove(&value)?;
                println!("Removed \"{value}\"");
            }
            HistoryAction::Clear => {
                history.clear()?;
                println!("Search history cleared");
            }
        },
    }

    Ok(())
}
