use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::debug;

use vocab_srs::config::{self, CONFIG_FILE, PROGRESS_FILE, STUDY_LOG_FILE};
use vocab_srs::export::json::{export_catalog_to_path, export_report_to_path, import_catalog};
use vocab_srs::*;

#[derive(Parser)]
#[command(name = "vocab-srs", about = "Spaced repetition vocabulary trainer", version)]
struct Cli {
    /// Directory holding progress, study log and config (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Vocabulary catalog JSON file (default: built-in sample words)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List items due for review now
    Due {
        /// Show at most this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record a single review
    Grade {
        /// Item id from the catalog
        item: String,
        /// Recall quality, 0 (blackout) to 5 (perfect)
        quality: u8,
    },

    /// Interactive review session over due items
    Review,

    /// Show learning statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a progress report joined with catalog text
    Export {
        path: PathBuf,
    },

    /// Write the active catalog to a file, e.g. to start a custom word list
    ExportCatalog {
        path: PathBuf,
    },
}

struct App {
    data_dir: PathBuf,
    catalog: Catalog,
    config: SrsConfig,
}

impl App {
    fn new(data_dir: Option<PathBuf>, catalog: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(config::default_data_dir);
        let catalog = match catalog {
            Some(path) => import_catalog(path)?,
            None => Catalog::sample(),
        };
        let config = SrsConfig::load(&data_dir.join(CONFIG_FILE));
        debug!("Using data directory {}", data_dir.display());

        Ok(Self {
            data_dir,
            catalog,
            config,
        })
    }

    fn progress_store(&self) -> ProgressStore {
        ProgressStore::new(self.data_dir.join(PROGRESS_FILE))
    }

    fn study_log_store(&self) -> StudyLogStore {
        StudyLogStore::new(self.data_dir.join(STUDY_LOG_FILE))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = App::new(cli.data_dir, cli.catalog.as_deref())?;

    match cli.command {
        Command::Due { limit } => run_due(&app, limit),
        Command::Grade { item, quality } => run_grade(&app, &item, quality),
        Command::Review => run_review(&app),
        Command::Stats { json } => run_stats(&app, json),
        Command::Export { path } => {
            let progress = app.progress_store().load_or_recover()?;
            export_report_to_path(&app.catalog, &progress, &app.config, &path)?;
            println!("Report written to {}", path.display());
            Ok(())
        }
        Command::ExportCatalog { path } => {
            export_catalog_to_path(&app.catalog, &path)?;
            println!("Catalog written to {}", path.display());
            Ok(())
        }
    }
}

fn run_due(app: &App, limit: Option<usize>) -> anyhow::Result<()> {
    let progress = app.progress_store().load_or_recover()?;
    let now = Utc::now();

    let mut shown = 0;
    for id in due_items(&app.catalog, &progress, now).take(limit.unwrap_or(usize::MAX)) {
        let level = mastery_level(progress.get(id), &app.config);
        match app.catalog.get(id) {
            Some(item) => println!("{:<10} {:<9} [{}] {}", id, level, item.category, item.text),
            None => println!("{:<10} {}", id, level),
        }
        shown += 1;
    }

    if shown == 0 {
        println!("Nothing due. Come back later!");
    }
    Ok(())
}

fn run_grade(app: &App, item: &str, quality: u8) -> anyhow::Result<()> {
    if !app.catalog.contains(item) {
        return Err(Error::UnknownItem(item.to_string()).into());
    }

    let store = app.progress_store();
    let log_store = app.study_log_store();
    let mut progress = store.load_or_recover()?;
    let mut study_log = log_store.load()?;
    let now = Utc::now();

    let state = grade(&mut progress, item, quality, now, &app.config)?;
    store.save(&progress)?;
    study_log.record_session(now.date_naive());
    log_store.save(&study_log)?;

    println!(
        "{}: next review in {} day(s) on {} ({})",
        item,
        state.interval,
        state.due_date.format("%Y-%m-%d"),
        mastery_level(Some(&state), &app.config)
    );
    Ok(())
}

fn run_review(app: &App) -> anyhow::Result<()> {
    let mut session = ReviewSession::start(
        &app.catalog,
        app.progress_store(),
        app.study_log_store(),
        app.config.clone(),
        Utc::now(),
    )?;

    if session.is_completed() {
        println!("Nothing due. Come back later!");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_round = 0;

    while let Some(item) = session.current().cloned() {
        if session.round_number() != last_round {
            last_round = session.round_number();
            println!("\n{}", session.phase_message());
        }

        println!("\n  {}", item.id);
        if prompt(&mut lines, "  (Enter to reveal) ")?.is_none() {
            break;
        }
        println!("  {}  [{}]", item.text, item.category);

        loop {
            let Some(answer) = prompt(&mut lines, "  Quality 0-5: ")? else {
                return finish(&mut session);
            };
            let Ok(quality) = answer.trim().parse::<u8>() else {
                println!("  Please enter a number from 0 to 5.");
                continue;
            };

            match session.grade_current(quality, Utc::now()) {
                Ok(state) => {
                    println!("  Next review in {} day(s).", state.interval);
                    break;
                }
                Err(Error::InvalidRating(_)) => {
                    println!("  Please enter a number from 0 to 5.");
                }
                Err(e @ Error::StoreWrite { .. }) => {
                    eprintln!("  Warning: {}. Will retry saving.", e);
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    finish(&mut session)
}

fn finish(session: &mut ReviewSession<'_>) -> anyhow::Result<()> {
    if session.has_unsaved_changes() {
        session
            .retry_save()
            .context("progress could not be saved")?;
    }
    println!("\nReviewed {} item(s).", session.graded_count());
    Ok(())
}

fn prompt<B: BufRead>(
    lines: &mut io::Lines<B>,
    message: &str,
) -> anyhow::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

fn run_stats(app: &App, json: bool) -> anyhow::Result<()> {
    let progress = app.progress_store().load_or_recover()?;
    let study_log = app.study_log_store().load()?;
    let stats = Stats::compute(&app.catalog, &progress, &study_log, &app.config, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Items:            {} ({} reviewed)", stats.total_items, stats.tracked);
    for level in MasteryLevel::ALL {
        println!("  {:<15} {}", format!("{}:", level), stats.count(level));
    }
    println!("By category:");
    for category in &stats.by_category {
        println!(
            "  {:<15} {}/{}",
            format!("{}:", category.category),
            category.studied,
            category.total
        );
    }
    println!("Due now:          {}", stats.due_now);
    println!("Average accuracy: {:.1}%", stats.average_accuracy);
    println!("Streak:           {} day(s)", stats.streak);
    println!("Total sessions:   {}", stats.total_sessions);
    Ok(())
}
