//! The `recall submit` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{MemoId, RecallSubmission, UserId};

use super::{parse_arg, print_graded, read_text, Session};

pub fn execute(
    config: Option<PathBuf>,
    user: String,
    memo: String,
    cells: PathBuf,
    lock: bool,
    seconds_remaining: f64,
    format: String,
) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    let memo: MemoId = parse_arg(&memo)?;
    let cells: Vec<String> = read_text(&cells)?.lines().map(str::to_string).collect();
    let mut session = Session::open(config)?;

    let graded = session.service.submit(RecallSubmission {
        memo,
        user,
        lock,
        cells,
        seconds_remaining,
    })?;
    session.save()?;

    print_graded(&graded, &format)
}
