//! The `recall validate` command.

use std::path::PathBuf;

use anyhow::Result;

use recall_core::model::{Discipline, MemoContent};
use recall_core::parser::parse;

use super::{make_rng, parse_arg, read_text};

pub fn execute(discipline: String, file: PathBuf, language: Option<String>) -> Result<()> {
    let discipline: Discipline = parse_arg(&discipline)?;
    let text = read_text(&file)?;
    let content = parse(discipline, &text, language.as_deref(), &mut make_rng(None))?;

    let kind = match content {
        MemoContent::Numbers(_) if discipline == Discipline::Cards => "cards",
        MemoContent::Numbers(_) => "digits",
        MemoContent::Words(_) => "words",
        MemoContent::Dates(_) => "dates",
    };
    println!(
        "{}: {} {kind} ({})",
        file.display(),
        content.len(),
        discipline.title()
    );
    println!("Valid.");
    Ok(())
}
