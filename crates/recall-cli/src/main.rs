//! recall CLI: memo creation, recall submission and correction.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "recall", version, about = "Memory-sport recall correction and scoring")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and pool files
    Init,

    /// Parse a free-text memo file without storing it
    Validate {
        /// Discipline (base2, base10, words, dates, spoken, cards)
        #[arg(long)]
        discipline: String,

        /// Free-text file
        #[arg(long)]
        file: PathBuf,

        /// Language, for words and dates
        #[arg(long)]
        language: Option<String>,
    },

    /// Create a memo with random content
    Generate {
        /// Owner user id
        #[arg(long)]
        user: String,

        #[arg(long)]
        discipline: String,

        /// Number of items to generate
        #[arg(long)]
        count: usize,

        /// Memorization time
        #[arg(long)]
        memo_time: u32,

        /// Recall time
        #[arg(long)]
        recall_time: u32,

        #[arg(long)]
        language: Option<String>,

        /// Display grouping (e.g. "2,1")
        #[arg(long)]
        pattern: Option<String>,

        /// RNG seed for reproducible content
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a memo from a free-text file
    Create {
        #[arg(long)]
        user: String,

        #[arg(long)]
        discipline: String,

        /// Free-text file
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        memo_time: u32,

        #[arg(long)]
        recall_time: u32,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        pattern: Option<String>,

        /// RNG seed (dates recall order)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print memo content, or the numbered recall sheet
    Show {
        #[arg(long)]
        user: String,

        #[arg(long)]
        memo: String,

        /// Print the prompts to answer, in cell order (dates without years)
        #[arg(long)]
        recall_sheet: bool,
    },

    /// Submit a recall attempt, one cell per line
    Submit {
        #[arg(long)]
        user: String,

        #[arg(long)]
        memo: String,

        /// File with one answer per line
        #[arg(long)]
        cells: PathBuf,

        /// Lock the attempt after correcting it
        #[arg(long)]
        lock: bool,

        #[arg(long, default_value = "0.0")]
        seconds_remaining: f64,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Recompute the correction of a recall (memo owner only)
    Recorrect {
        #[arg(long)]
        user: String,

        #[arg(long)]
        recall: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Accept a spelling as almost correct for a word
    Accept {
        #[arg(long)]
        user: String,

        #[arg(long)]
        language: String,

        /// The memorized word
        #[arg(long)]
        truth: String,

        /// The spelling to accept
        #[arg(long)]
        word: String,
    },

    /// Cycle memo visibility: private, competition, public
    Visibility {
        #[arg(long)]
        user: String,

        #[arg(long)]
        memo: String,
    },

    /// Delete a memo with its recalls
    DeleteMemo {
        #[arg(long)]
        user: String,

        #[arg(long)]
        memo: String,
    },

    /// Delete a single recall
    DeleteRecall {
        #[arg(long)]
        user: String,

        #[arg(long)]
        recall: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("recall=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate {
            discipline,
            file,
            language,
        } => commands::validate::execute(discipline, file, language),
        Commands::Generate {
            user,
            discipline,
            count,
            memo_time,
            recall_time,
            language,
            pattern,
            seed,
        } => commands::generate::execute(
            config,
            user,
            discipline,
            count,
            memo_time,
            recall_time,
            language,
            pattern,
            seed,
        ),
        Commands::Create {
            user,
            discipline,
            file,
            memo_time,
            recall_time,
            language,
            pattern,
            seed,
        } => commands::create::execute(
            config,
            user,
            discipline,
            file,
            memo_time,
            recall_time,
            language,
            pattern,
            seed,
        ),
        Commands::Show {
            user,
            memo,
            recall_sheet,
        } => commands::show::execute(config, user, memo, recall_sheet),
        Commands::Submit {
            user,
            memo,
            cells,
            lock,
            seconds_remaining,
            format,
        } => commands::submit::execute(config, user, memo, cells, lock, seconds_remaining, format),
        Commands::Recorrect {
            user,
            recall,
            format,
        } => commands::recorrect::execute(config, user, recall, format),
        Commands::Accept {
            user,
            language,
            truth,
            word,
        } => commands::accept::execute(config, user, language, truth, word),
        Commands::Visibility { user, memo } => commands::visibility::execute(config, user, memo),
        Commands::DeleteMemo { user, memo } => commands::delete::memo(config, user, memo),
        Commands::DeleteRecall { user, recall } => commands::delete::recall(config, user, recall),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
