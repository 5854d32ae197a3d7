//! Command-line interface for British Days.
//!
//! Finds British slang terms, stores them in a local database and lets you
//! browse and edit them.

use british_days::{
    Config, HarvestEvent, Harvester, SlangSearcher, SlangStore, StopReason, StoreOptions,
    StoreOutcome, Term, TermFields, error::Result,
};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, error, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about = "British slang collector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON config file
    #[arg(long, global = true, default_value = british_days::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Path to a custom database file (optional)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one new term and add it
    Search,
    /// Keep fetching terms until too many in a row are duplicates
    Harvest {
        /// Stop after this many consecutive attempts add nothing
        #[arg(long)]
        max_failures: Option<u32>,
        /// Pause between attempts, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// List all stored terms, newest first
    List,
    /// Show one term by id
    Show { id: i64 },
    /// Find terms containing the text
    Find { query: String },
    /// Add a term by hand
    Add(TermArgs),
    /// Replace the fields of a term
    Update {
        id: i64,
        #[command(flatten)]
        fields: TermArgs,
    },
    /// Delete a term
    Delete { id: i64 },
    /// Show database statistics
    Stats,
    /// Show recent searches
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Delete the database file
    ClearDb,
}

#[derive(Args, Debug)]
struct TermArgs {
    /// The slang term
    term: String,
    #[arg(long)]
    definition: Option<String>,
    #[arg(long)]
    example: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    polish: Option<String>,
    #[arg(long)]
    pronunciation: Option<String>,
}

impl From<TermArgs> for TermFields {
    fn from(args: TermArgs) -> Self {
        TermFields {
            term: args.term,
            definition: args.definition,
            example: args.example,
            category: args.category,
            source: args.source,
            polish: args.polish,
            pronunciation: args.pronunciation,
        }
    }
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config::load(&cli.config);

    if let Commands::ClearDb = cli.command {
        let path = match cli.db_path {
            Some(path) => path,
            None => config.db_path()?,
        };
        info!("Clearing database...");
        match SlangStore::clear_database(&path) {
            Ok(_) => println!("{}", "Database cleared successfully.".green()),
            Err(e) => {
                error!("Failed to clear database: {}", e);
                eprintln!("{}", format!("Error clearing database: {}", e).red());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let store = match SlangStore::open(StoreOptions {
        db_path: cli.db_path.clone(),
        config: config.clone(),
    }) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open database: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Search => handle_search(&config, &store).await,
        Commands::Harvest {
            max_failures,
            interval_ms,
        } => {
            let mut harvest = config.harvest.clone();
            if let Some(max) = max_failures {
                harvest.max_consecutive_failures = max;
            }
            if let Some(ms) = interval_ms {
                harvest.interval_ms = ms;
            }
            handle_harvest(&config, &harvest, &store).await
        }
        Commands::List => handle_list(&store),
        Commands::Show { id } => handle_show(&store, id),
        Commands::Find { query } => handle_find(&store, &query),
        Commands::Add(args) => report_outcome("Added", store.add_term(&args.into()).map(|id| id.to_string())),
        Commands::Update { id, fields } => {
            report_outcome("Updated", store.update_term(id, &fields.into()).map(|_| id.to_string()))
        }
        Commands::Delete { id } => {
            report_outcome("Deleted", store.delete_term(id).map(|_| id.to_string()))
        }
        Commands::Stats => handle_stats(&store),
        Commands::History { limit } => handle_history(&store, limit),
        Commands::ClearDb => Ok(()),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
    Ok(())
}

fn print_term(index: usize, term: &Term) {
    println!(
        "{}. {} {}",
        index,
        term.term.to_uppercase().bold().cyan(),
        format!("[#{}]", term.id).dimmed()
    );
    if let Some(category) = &term.category {
        println!("   Category: {}", category.italic());
    }
    if let Some(definition) = &term.definition {
        println!("   Definition: {}", definition);
    }
    if let Some(polish) = &term.polish {
        println!("   Polish: {}", polish.green());
    }
    if let Some(pronunciation) = &term.pronunciation {
        println!("   Pronunciation: {}", pronunciation);
    }
    if let Some(example) = &term.example {
        println!("   Example: \"{}\"", example.italic());
    }
    println!(
        "   Added: {} | Source: {}",
        term.date_added.format("%Y-%m-%d %H:%M:%S"),
        term.source.as_deref().unwrap_or("unknown")
    );
}

fn report_outcome(verb: &str, outcome: StoreOutcome<String>) -> Result<()> {
    match outcome {
        StoreOutcome::Ok(id) => {
            println!("{}", format!("{} term #{}.", verb, id).green());
            Ok(())
        }
        StoreOutcome::Conflict => {
            println!("{}", "A term with that name already exists.".yellow());
            Ok(())
        }
        StoreOutcome::NotFound => {
            println!("{}", "No term with that id.".yellow());
            Ok(())
        }
        StoreOutcome::Transient(e) | StoreOutcome::Fatal(e) => Err(e),
    }
}

async fn handle_search(config: &Config, store: &SlangStore) -> Result<()> {
    let mut searcher = SlangSearcher::new(config.search_api.clone(), Some(store.clone()))?;
    println!("Searching for new British slang...");
    let record = searcher.search_new_slang().await;
    let outcome = store.add_term(&TermFields::from(&record));
    if outcome.is_ok() && record.source_url.is_some() {
        store.mark_cache_added_to_db(&record.term)?;
    }

    println!("\n{}", record.term.to_uppercase().bold().cyan());
    println!("   Definition: {}", record.definition);
    if !record.example.is_empty() {
        println!("   Example: \"{}\"", record.example.italic());
    }
    if let Some(url) = &record.source_url {
        println!("   Source: {}", url.dimmed());
    }
    match outcome {
        StoreOutcome::Ok(_) => println!("{}", format!("Added: {}", record.term).green()),
        StoreOutcome::Conflict => println!("{}", format!("Duplicate: {}", record.term).yellow()),
        StoreOutcome::NotFound => {}
        StoreOutcome::Transient(e) | StoreOutcome::Fatal(e) => return Err(e),
    }
    Ok(())
}

async fn handle_harvest(
    config: &Config,
    harvest: &british_days::HarvestConfig,
    store: &SlangStore,
) -> Result<()> {
    let mut searcher = SlangSearcher::new(config.search_api.clone(), Some(store.clone()))?;
    let harvester = Harvester::new(harvest);
    let stop = harvester.stop_handle();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let worker_store = store.clone();
    let worker = tokio::spawn(async move {
        harvester.run(&mut searcher, &worker_store, Some(&tx)).await
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::Relaxed);
        }
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    while let Some(event) = rx.recv().await {
        match event {
            HarvestEvent::Started { known_terms } => {
                spinner.set_message(format!("Searching ({} terms known)...", known_terms));
            }
            HarvestEvent::Added { term, total_added } => {
                spinner.println(format!("{} {}", "+".green().bold(), term.term.bold()));
                spinner.set_message(format!("{} added", total_added));
            }
            HarvestEvent::Duplicate {
                term,
                consecutive_failures,
            } => {
                spinner.set_message(format!(
                    "Duplicate: {} ({} in a row)",
                    term, consecutive_failures
                ));
            }
            HarvestEvent::Failed {
                term,
                reason,
                consecutive_failures,
            } => {
                spinner.println(format!("{} {}: {}", "!".red().bold(), term, reason));
                spinner.set_message(format!("{} failures in a row", consecutive_failures));
            }
            HarvestEvent::Finished { .. } => break,
        }
    }
    spinner.finish_and_clear();

    let summary = worker
        .await
        .map_err(|e| british_days::SlangError::Internal(format!("Harvest task failed: {}", e)))??;
    let why = match summary.reason {
        StopReason::ConsecutiveFailures => "too many duplicates in a row",
        StopReason::Cancelled => "stopped by user",
    };
    println!(
        "{}",
        format!(
            "Harvest finished: {} new terms in {} attempts ({}).",
            summary.added, summary.attempts, why
        )
        .green()
    );
    Ok(())
}

fn handle_list(store: &SlangStore) -> Result<()> {
    let terms = store.all_terms()?;
    if terms.is_empty() {
        println!("No terms in database yet. Run 'search' to find new slang!");
        return Ok(());
    }
    println!("{}\n", "=== British Slang Database ===".bold());
    for (i, term) in terms.iter().enumerate() {
        print_term(i + 1, term);
        println!();
    }
    Ok(())
}

fn handle_show(store: &SlangStore, id: i64) -> Result<()> {
    match store.term_by_id(id)? {
        Some(term) => print_term(1, &term),
        None => println!("No term with id {}.", id.to_string().yellow()),
    }
    Ok(())
}

fn handle_find(store: &SlangStore, query: &str) -> Result<()> {
    let terms = store.search_terms(query)?;
    store.add_search_history(query, terms.len() as i64)?;
    if terms.is_empty() {
        println!("No terms found for '{}'.", query.yellow());
        return Ok(());
    }
    for (i, term) in terms.iter().enumerate() {
        print_term(i + 1, term);
        println!();
    }
    Ok(())
}

fn handle_stats(store: &SlangStore) -> Result<()> {
    let stats = store.database_stats()?;
    println!("{}", "Database Stats:".bold());
    println!("  Total terms: {}", stats.total_terms.to_string().cyan());
    println!("  Total searches: {}", stats.total_searches);
    println!("  Searched locations: {}", stats.searched_locations);
    println!("  Cached, not yet added: {}", stats.pending_cache);
    println!("  Database: {}", stats.storage_path.display());

    let recent = store.searched_locations(5)?;
    if !recent.is_empty() {
        println!("{}", "Recently visited pages:".bold());
        for location in recent {
            println!(
                "  {} {} ({} found)",
                format!("[{}]", location.source_type).dimmed(),
                location.source_identifier,
                location.terms_found
            );
        }
    }
    Ok(())
}

fn handle_history(store: &SlangStore, limit: usize) -> Result<()> {
    let history = store.recent_searches(limit)?;
    if history.is_empty() {
        println!("No searches recorded yet.");
    }
    for entry in history {
        println!(
            "{}  {} ({} results)",
            entry.search_date.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            entry.search_term.bold(),
            entry.result_count
        );
    }
    Ok(())
}
