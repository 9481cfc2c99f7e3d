use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config::Settings;
use crate::controller::{DateSelectionController, ViewSnapshot};
use crate::logging::{LogTarget, default_log_path, init_logging};
use crate::models::{FavoriteEntry, parse_date_input};
use crate::session::{build_controller, build_store};
use crate::tui::run_interactive;

#[derive(Parser)]
#[command(name = "onthisday-explorer")]
#[command(version)]
#[command(about = "Browse who was born on a given day and keep favorites", long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep favorites in memory only
    #[arg(long, global = true)]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive browser (default)
    Browse {
        /// Date to open with, MM-DD or YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Print one page of events for a date
    Lookup {
        /// MM-DD or YYYY-MM-DD
        date: String,
        /// Case-insensitive filter on the event text
        #[arg(long, short)]
        search: Option<String>,
        /// Page to print, starting at 1
        #[arg(long, short, default_value_t = 1)]
        page: usize,
    },
    /// List saved favorites
    Favorites,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let persist = !cli.no_persist;

    match cli.command {
        None => browse(cli.config, persist, None),
        Some(Commands::Browse { date }) => browse(cli.config, persist, date),
        Some(Commands::Lookup { date, search, page }) => {
            init_logging(LogTarget::Stderr)?;
            let settings = Settings::load(cli.config.as_deref())?;
            lookup(&settings, persist, &date, search.as_deref(), page)
        }
        Some(Commands::Favorites) => {
            init_logging(LogTarget::Stderr)?;
            let settings = Settings::load(cli.config.as_deref())?;
            show_favorites(&settings, persist)
        }
    }
}

fn browse(config: Option<PathBuf>, persist: bool, date: Option<String>) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    let initial_date = date.as_deref().map(parse_date_input).transpose()?;

    // The terminal belongs to the TUI, so a missing log file is not fatal
    if let Err(e) = default_log_path().and_then(|path| init_logging(LogTarget::File(path))) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let controller = build_controller(&settings, persist)?;
    run_interactive(controller, runtime.handle().clone(), settings.category.title(), initial_date)
}

fn lookup(
    settings: &Settings,
    persist: bool,
    date: &str,
    search: Option<&str>,
    page: usize,
) -> Result<()> {
    if page == 0 {
        bail!("--page starts at 1");
    }
    let date = parse_date_input(date)?;

    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let mut controller = build_controller(settings, persist)?;
    runtime.block_on(controller.on_date_selected(Some(date)));

    if let Some(term) = search {
        controller.set_search_term(term);
    }
    turn_to_page(&mut controller, page);

    print!("{}", format_lookup(settings.category.title(), &controller.snapshot()));
    Ok(())
}

/// Advance to `page`, stopping at the last one
fn turn_to_page(controller: &mut DateSelectionController, page: usize) {
    while controller.list().page() < page && controller.next_page() {}
}

/// Text block printed by `lookup`
fn format_lookup(heading: &str, view: &ViewSnapshot) -> String {
    let mut out = String::new();
    let title = match &view.date_label {
        Some(label) => format!("{} on {}", heading, label),
        None => heading.to_string(),
    };
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    if view.rows.is_empty() {
        let _ = writeln!(out, "No events found");
        return out;
    }

    for row in &view.rows {
        let marker = if row.favorited { "★ " } else { "" };
        let _ = writeln!(out, "{}{}", marker, row.event);
    }

    let _ = writeln!(out);
    if view.search_term.is_empty() {
        let _ = writeln!(out, "Page {}/{} ({} events)", view.page, view.page_count, view.total_len);
    } else {
        let _ = writeln!(
            out,
            "Page {}/{} ({} of {} events match \"{}\")",
            view.page, view.page_count, view.filtered_len, view.total_len, view.search_term
        );
    }
    out
}

fn show_favorites(settings: &Settings, persist: bool) -> Result<()> {
    let store = build_store(settings, persist)?;
    let favorites = store.read().context("Failed to read favorites")?;

    print!("{}", format_favorites(favorites.entries()));
    if persist {
        println!();
        println!("Favorites file: {}", settings.favorites_path()?.display());
    }
    Ok(())
}

/// Favorites listing grouped by date label in insertion order
fn format_favorites(entries: &[FavoriteEntry]) -> String {
    if entries.is_empty() {
        return "No favorites saved yet\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Favorites ({})", entries.len());
    let _ = writeln!(out, "================================");

    let mut labels: Vec<&str> = Vec::new();
    for entry in entries {
        if !labels.contains(&entry.formatted_date.as_str()) {
            labels.push(&entry.formatted_date);
        }
    }
    for label in labels {
        for entry in entries.iter().filter(|e| e.formatted_date == label) {
            let _ = writeln!(out, "{}: {} - {}", label, entry.event().description(), entry.year);
        }
    }

    out
}
