//! The `recall visibility` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{MemoId, UserId};

use super::{parse_arg, Session};

pub fn execute(config: Option<PathBuf>, user: String, memo: String) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    let memo: MemoId = parse_arg(&memo)?;
    let mut session = Session::open(config)?;

    let visibility = session.service.toggle_visibility(user, memo)?;
    session.save()?;

    println!("Memo {memo} is now {visibility}");
    Ok(())
}
