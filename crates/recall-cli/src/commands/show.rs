//! The `recall show` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{MemoId, UserId};

use super::{parse_arg, Session};

pub fn execute(
    config: Option<PathBuf>,
    user: String,
    memo: String,
    recall_sheet: bool,
) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    let memo: MemoId = parse_arg(&memo)?;
    let session = Session::open(config)?;

    if recall_sheet {
        for (cell, prompt) in session.service.recall_sheet(memo)?.iter().enumerate() {
            println!("{}. {prompt}", cell + 1);
        }
        return Ok(());
    }

    let text = session.service.export_memo_text(user, memo)?;
    println!("{text}");
    Ok(())
}
