//! Cell-by-cell classification of a recall attempt.
//!
//! Blank cells are split into gaps (skipped inside the attempted range) and
//! not-reached cells (after the last answer). Cells beyond the memo are
//! off limits. Everything else goes to the discipline's comparator.

use crate::model::{Discipline, Item, MemoContent};
use crate::pools::{normalize_word, AlmostCorrectLookup};
use crate::registry::rules;

/// What a comparator may consult besides the truth itself.
pub struct CellContext<'a> {
    /// Language of the memo, for override lookups.
    pub language: Option<&'a str>,
    pub overrides: &'a dyn AlmostCorrectLookup,
}

/// A cell counts as blank when it holds only whitespace.
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// One past the last non-blank cell among the first `truth_len` cells.
pub fn start_of_emptiness(cells: &[String], truth_len: usize) -> usize {
    cells
        .iter()
        .take(truth_len)
        .rposition(|cell| !is_blank(cell))
        .map_or(0, |last| last + 1)
}

/// Classify every submitted cell. The output has one item per cell.
pub fn correct_cells(
    discipline: Discipline,
    truth: &MemoContent,
    cells: &[String],
    ctx: &CellContext<'_>,
) -> Vec<Item> {
    let n = truth.len();
    let boundary = start_of_emptiness(cells, n);
    let compare = rules(discipline).compare;

    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i >= n {
                Item::OffLimits
            } else if is_blank(cell) {
                if i < boundary {
                    Item::Gap
                } else {
                    Item::NotReached
                }
            } else {
                compare(truth, i, cell, ctx)
            }
        })
        .collect()
}

fn verdict(correct: bool) -> Item {
    if correct {
        Item::Correct
    } else {
        Item::Wrong
    }
}

/// Integer equality for digits and cards.
pub(crate) fn compare_number(
    truth: &MemoContent,
    index: usize,
    guess: &str,
    _: &CellContext<'_>,
) -> Item {
    let expected = match truth {
        MemoContent::Numbers(items) => items.get(index).copied(),
        _ => None,
    };
    let given = guess.trim().parse::<i64>().ok();
    verdict(matches!((expected, given), (Some(e), Some(g)) if i64::from(e) == g))
}

/// Case-insensitive equality, then the almost-correct override table.
pub(crate) fn compare_word(
    truth: &MemoContent,
    index: usize,
    guess: &str,
    ctx: &CellContext<'_>,
) -> Item {
    let Some(expected) = (match truth {
        MemoContent::Words(items) => items.get(index),
        _ => None,
    }) else {
        return Item::Wrong;
    };
    if normalize_word(expected) == normalize_word(guess) {
        Item::Correct
    } else if ctx
        .language
        .is_some_and(|language| ctx.overrides.accepts(language, expected, guess))
    {
        Item::AlmostCorrect
    } else {
        Item::Wrong
    }
}

/// Cell `index` asks for the year of the story shown on recall row `index`.
pub(crate) fn compare_date(
    truth: &MemoContent,
    index: usize,
    guess: &str,
    _: &CellContext<'_>,
) -> Item {
    let expected = match truth {
        MemoContent::Dates(dates) => dates.at_slot(index).map(|e| e.year),
        _ => None,
    };
    let given = guess.trim().parse::<i64>().ok();
    verdict(matches!((expected, given), (Some(e), Some(g)) if i64::from(e) == g))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateEntry, Dates};
    use crate::pools::{AlmostCorrectWords, NoOverrides};
    use crate::model::Item::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn plain() -> CellContext<'static> {
        CellContext {
            language: None,
            overrides: &NoOverrides,
        }
    }

    #[test]
    fn emptiness_boundary() {
        assert_eq!(start_of_emptiness(&cells(&["1", "", "3", " ", ""]), 5), 3);
        assert_eq!(start_of_emptiness(&cells(&["", ""]), 2), 0);
        // cells past the memo do not move the boundary
        assert_eq!(start_of_emptiness(&cells(&["1", "", "7"]), 2), 1);
    }

    #[test]
    fn trailing_blanks_are_not_reached() {
        let truth = MemoContent::Numbers(vec![1, 2, 3, 4, 5]);
        let result = correct_cells(
            Discipline::Base10,
            &truth,
            &cells(&["1", "2", "9", "", ""]),
            &plain(),
        );
        assert_eq!(result, vec![Correct, Correct, Wrong, NotReached, NotReached]);
    }

    #[test]
    fn inner_blanks_are_gaps() {
        let truth = MemoContent::Numbers(vec![1, 0, 1, 1]);
        let result = correct_cells(
            Discipline::Base2,
            &truth,
            &cells(&["1", " ", "1", ""]),
            &plain(),
        );
        assert_eq!(result, vec![Correct, Gap, Correct, NotReached]);
    }

    #[test]
    fn cells_past_the_end_are_off_limits() {
        let truth = MemoContent::Numbers(vec![7, 8]);
        let result = correct_cells(
            Discipline::Base10,
            &truth,
            &cells(&["7", "8", "9", "", "x"]),
            &plain(),
        );
        assert_eq!(result, vec![Correct, Correct, OffLimits, OffLimits, OffLimits]);
    }

    #[test]
    fn short_recall_keeps_its_length() {
        let truth = MemoContent::Numbers(vec![1, 2, 3]);
        let result = correct_cells(Discipline::Base10, &truth, &cells(&["1"]), &plain());
        assert_eq!(result, vec![Correct]);
    }

    #[test]
    fn numbers_compare_as_integers() {
        let truth = MemoContent::Numbers(vec![5, 51, 0]);
        let result = correct_cells(
            Discipline::Cards,
            &truth,
            &cells(&[" 5 ", "051", "zero"]),
            &plain(),
        );
        assert_eq!(result, vec![Correct, Correct, Wrong]);
    }

    #[test]
    fn words_use_overrides() {
        let truth = MemoContent::Words(vec!["colour".into(), "river".into(), "apple".into()]);
        let mut table = AlmostCorrectWords::new();
        table.insert("english", "colour", "color");
        let ctx = CellContext {
            language: Some("english"),
            overrides: &table,
        };
        let result = correct_cells(
            Discipline::Words,
            &truth,
            &cells(&["Color", " RIVER ", "pear"]),
            &ctx,
        );
        assert_eq!(result, vec![AlmostCorrect, Correct, Wrong]);
    }

    #[test]
    fn dates_follow_recall_order() {
        let dates = Dates::new(vec![
            DateEntry {
                year: 1492,
                story: "ship sails west".into(),
                recall_slot: 1,
            },
            DateEntry {
                year: 1066,
                story: "arrow hits king".into(),
                recall_slot: 0,
            },
        ])
        .unwrap();
        let truth = MemoContent::Dates(dates);
        let result = correct_cells(
            Discipline::Dates,
            &truth,
            &cells(&["1066", "1066"]),
            &plain(),
        );
        assert_eq!(result, vec![Correct, Wrong]);
    }
}
