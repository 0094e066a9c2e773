//! Subcommand implementations.

pub mod accept;
pub mod create;
pub mod delete;
pub mod generate;
pub mod init;
pub mod recorrect;
pub mod show;
pub mod submit;
pub mod validate;
pub mod visibility;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use recall_core::service::{GradedRecall, RecallService};
use recall_core::store::InMemoryStore;

use crate::config::{load_config_from, RecallConfig};

/// A loaded config plus a service over the stored records.
pub struct Session {
    pub config: RecallConfig,
    pub service: RecallService<InMemoryStore>,
}

impl Session {
    pub fn open(config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let store = InMemoryStore::open(&config.store_path)?;
        let service = RecallService::new(store, config.coefficients.clone());
        Ok(Self { config, service })
    }

    /// Write the store back to disk.
    pub fn save(self) -> Result<()> {
        self.service
            .into_repository()
            .save_json(&self.config.store_path)
    }
}

/// Parse an id or discipline argument.
pub fn parse_arg<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse::<T>().map_err(anyhow::Error::msg)
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn read_text(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print a correction as a table or as JSON.
pub fn print_graded(graded: &GradedRecall, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(graded)?);
        return Ok(());
    }

    use comfy_table::{Cell, Table};

    let c = &graded.correction;
    println!(
        "Recall {} on memo {}{}",
        graded.recall,
        graded.memo,
        if graded.locked { " (locked)" } else { "" }
    );

    let mut table = Table::new();
    table.set_header(vec!["Outcome", "Cells"]);
    for (label, count) in [
        ("correct", c.counts.correct),
        ("almost correct", c.counts.almost_correct),
        ("wrong", c.counts.wrong),
        ("gap", c.counts.gap),
        ("not reached", c.counts.not_reached),
        ("off limits", c.counts.off_limits),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!("{table}");
    println!("Consecutive: {}", c.consecutive);
    println!("Raw score:   {}", c.raw_score);
    println!("Points:      {}", c.points);
    Ok(())
}
