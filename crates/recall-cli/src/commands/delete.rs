//! The `recall delete-memo` and `recall delete-recall` commands.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{MemoId, RecallId, UserId};

use super::{parse_arg, Session};

pub fn memo(config: Option<PathBuf>, user: String, memo: String) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    let memo: MemoId = parse_arg(&memo)?;
    let mut session = Session::open(config)?;

    let recalls = session.service.delete_memo(user, memo)?;
    session.save()?;

    println!("Deleted memo {memo} and {recalls} recall(s)");
    Ok(())
}

pub fn recall(config: Option<PathBuf>, user: String, recall: String) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    let recall: RecallId = parse_arg(&recall)?;
    let mut session = Session::open(config)?;

    session.service.delete_recall(user, recall)?;
    session.save()?;

    println!("Deleted recall {recall}");
    Ok(())
}
