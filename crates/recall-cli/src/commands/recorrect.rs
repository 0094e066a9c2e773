//! The `recall recorrect` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{RecallId, UserId};

use super::{parse_arg, print_graded, Session};

pub fn execute(config: Option<PathBuf>, user: String, recall: String, format: String) -> Result<()> {
    let user: UserId = parse_arg(&user)?;
    let recall: RecallId = parse_arg(&recall)?;
    let mut session = Session::open(config)?;

    let graded = session.service.recorrect(user, recall)?;
    session.save()?;

    print_graded(&graded, &format)
}
