//! Raw score calculation.
//!
//! Raw scores only look at the attempted prefix of a classification, i.e.
//! the cells before the start of emptiness. Numbers and cards are scored in
//! rows, words in columns; spoken numbers stop at the first mistake and
//! dates subtract half a point per wrong answer.

use crate::model::{Discipline, Item};
use crate::registry::rules;

/// Raw score of `items` for `discipline`, looking only at the first
/// `attempted` cells.
pub fn raw_score(discipline: Discipline, items: &[Item], attempted: usize) -> u32 {
    let rules = rules(discipline);
    let prefix = &items[..attempted.min(items.len())];
    (rules.raw_score)(prefix, rules.chunk_size)
}

/// Length of the leading run of correct cells.
pub fn consecutive(items: &[Item]) -> usize {
    items.iter().take_while(|&&item| item == Item::Correct).count()
}

fn count(items: &[Item], wanted: Item) -> usize {
    items.iter().filter(|&&item| item == wanted).count()
}

/// Full rows score their length; a row with a single mistake scores half
/// its correct cells, rounded up; anything else scores nothing.
pub(crate) fn chunked_numbers(attempted: &[Item], chunk_size: Option<usize>) -> u32 {
    let size = chunk_size.unwrap_or(attempted.len()).max(1);
    attempted
        .chunks(size)
        .map(|row| {
            let correct = count(row, Item::Correct);
            if correct == row.len() {
                correct
            } else if correct + 1 == row.len() {
                correct.div_ceil(2)
            } else {
                0
            }
        })
        .sum::<usize>() as u32
}

/// Word columns: almost-correct words keep a column alive but earn nothing,
/// and a column with one miss earns half its length less its almost-correct
/// words. The total is rounded up once.
pub(crate) fn word_columns(attempted: &[Item], chunk_size: Option<usize>) -> u32 {
    let size = chunk_size.unwrap_or(attempted.len()).max(1);
    let total: f64 = attempted
        .chunks(size)
        .map(|column| {
            let correct = count(column, Item::Correct);
            let almost = count(column, Item::AlmostCorrect);
            let accepted = correct + almost;
            if accepted == column.len() {
                correct as f64
            } else if accepted + 1 == column.len() {
                (column.len() as f64 / 2.0 - almost as f64).max(0.0)
            } else {
                0.0
            }
        })
        .sum();
    total.ceil() as u32
}

/// Spoken numbers: everything up to the first non-correct cell.
pub(crate) fn leading_run(attempted: &[Item], _: Option<usize>) -> u32 {
    consecutive(attempted) as u32
}

/// Dates: one point per correct year, minus half a point per wrong one,
/// never below zero.
pub(crate) fn dates(attempted: &[Item], _: Option<usize>) -> u32 {
    let correct = count(attempted, Item::Correct) as f64;
    let wrong = count(attempted, Item::Wrong) as f64;
    (correct - wrong / 2.0).max(0.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item::*;

    fn row(correct: usize, wrong: usize) -> Vec<Item> {
        let mut items = vec![Correct; correct];
        items.extend(vec![Wrong; wrong]);
        items
    }

    #[test]
    fn binary_row_with_one_mistake_scores_half() {
        let items = row(29, 1);
        assert_eq!(raw_score(Discipline::Base2, &items, items.len()), 15);
    }

    #[test]
    fn binary_row_with_two_mistakes_scores_nothing() {
        let items = row(28, 2);
        assert_eq!(raw_score(Discipline::Base2, &items, items.len()), 0);
    }

    #[test]
    fn rows_are_summed_and_last_row_may_be_short() {
        // 40 perfect, then a 5-cell row with one gap
        let mut items = vec![Correct; 40];
        items.extend([Correct, Correct, Gap, Correct, Correct]);
        assert_eq!(raw_score(Discipline::Base10, &items, items.len()), 40 + 2);
    }

    #[test]
    fn only_attempted_prefix_counts() {
        let mut items = vec![Correct; 30];
        items.extend(vec![NotReached; 30]);
        assert_eq!(raw_score(Discipline::Base2, &items, 30), 30);
        assert_eq!(raw_score(Discipline::Base2, &items, 0), 0);
    }

    #[test]
    fn cards_deck_rule() {
        let items = row(52, 0);
        assert_eq!(raw_score(Discipline::Cards, &items, 52), 52);
        let items = row(51, 1);
        assert_eq!(raw_score(Discipline::Cards, &items, 52), 26);
    }

    #[test]
    fn spoken_stops_at_first_mistake() {
        let items = vec![Correct, Correct, Correct, Wrong, Correct, Correct];
        assert_eq!(raw_score(Discipline::Spoken, &items, items.len()), 3);
        assert_eq!(consecutive(&items), 3);
        assert_eq!(consecutive(&[Gap, Correct]), 0);
    }

    #[test]
    fn word_column_rules() {
        // perfect column
        assert_eq!(raw_score(Discipline::Words, &row(20, 0), 20), 20);
        // almost-correct words keep the column but earn nothing
        let mut column = vec![Correct; 18];
        column.extend([AlmostCorrect, AlmostCorrect]);
        assert_eq!(raw_score(Discipline::Words, &column, 20), 18);
        // one miss: half the column
        assert_eq!(raw_score(Discipline::Words, &row(19, 1), 20), 10);
        // one miss and one almost-correct: 10 - 1
        let mut column = vec![Correct; 18];
        column.extend([AlmostCorrect, Wrong]);
        assert_eq!(raw_score(Discipline::Words, &column, 20), 9);
        // two misses: nothing
        assert_eq!(raw_score(Discipline::Words, &row(18, 2), 20), 0);
    }

    #[test]
    fn column_with_many_almost_correct_words_floors_at_zero() {
        assert_eq!(
            word_columns(&[AlmostCorrect, AlmostCorrect, AlmostCorrect, Wrong], Some(4)),
            0
        );
        // a floored column takes nothing away from the next one
        let mut items = vec![Correct; 8];
        items.extend(vec![AlmostCorrect; 11]);
        items.push(Wrong);
        items.extend(row(20, 0));
        assert_eq!(raw_score(Discipline::Words, &items, 40), 20);
    }

    #[test]
    fn short_last_column_rounds_up() {
        // a trailing 3-word column with one miss earns 1.5
        let mut items = vec![Correct; 20];
        items.extend([Correct, Correct, Wrong]);
        assert_eq!(raw_score(Discipline::Words, &items, items.len()), 22);
        let mut items = row(19, 1);
        items.extend([Correct, Correct, Wrong]);
        assert_eq!(raw_score(Discipline::Words, &items, items.len()), 12);
    }

    #[test]
    fn dates_penalize_wrong_answers() {
        let items = vec![Correct, Correct, Correct, Wrong, Wrong];
        assert_eq!(raw_score(Discipline::Dates, &items, items.len()), 2);
        let items = vec![Wrong; 5];
        assert_eq!(raw_score(Discipline::Dates, &items, items.len()), 0);
        let items = vec![Correct, Correct, Wrong, Gap];
        assert_eq!(raw_score(Discipline::Dates, &items, items.len()), 2);
    }
}
