//! The `recall accept` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::UserId;

use super::{parse_arg, Session};

pub fn execute(
    config: Option<PathBuf>,
    user: String,
    language: String,
    truth: String,
    word: String,
) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    if truth.trim().is_empty() || word.trim().is_empty() {
        anyhow::bail!("both --truth and --word must be non-empty");
    }
    let mut session = Session::open(config)?;

    session
        .service
        .add_almost_correct(user, &language, &truth, &word);
    session.save()?;

    println!("Accepted '{word}' for '{truth}' ({language})");
    println!("Run `recall recorrect` to apply it to existing recalls.");
    Ok(())
}
