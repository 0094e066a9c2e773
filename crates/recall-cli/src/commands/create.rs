//! The `recall create` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{Discipline, UserId};
use recall_core::service::{MemoRequest, MemoSource};

use super::{make_rng, parse_arg, read_text, Session};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: Option<PathBuf>,
    user: String,
    discipline: String,
    file: PathBuf,
    memo_time: u32,
    recall_time: u32,
    language: Option<String>,
    pattern: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let owner: UserId = parse_arg(&user)?;
    let discipline: Discipline = parse_arg(&discipline)?;
    let text = read_text(&file)?;
    let mut session = Session::open(config)?;

    let id = session.service.create_memo(
        MemoRequest {
            owner,
            discipline,
            memo_time,
            recall_time,
            language: language.as_deref(),
            pattern: pattern.as_deref(),
            source: MemoSource::Text(&text),
        },
        &mut make_rng(seed),
    )?;
    let items = session.service.memo(id)?.data.len();
    session.save()?;

    println!("Created memo {id} ({discipline}, {items} items)");
    Ok(())
}
