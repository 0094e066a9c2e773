//! The correction pipeline.
//!
//! Classify cells, score the attempted prefix and normalize into points.
//! Pure: the same memo, cells and tables always give the same correction.

use crate::corrector::{correct_cells, start_of_emptiness, CellContext};
use crate::model::{Correction, ItemCounts, MemoData};
use crate::points::{points, CoefficientTable};
use crate::pools::AlmostCorrectLookup;
use crate::scoring::{consecutive, raw_score};

/// Correct `cells` against `memo`.
pub fn correct(
    memo: &MemoData,
    cells: &[String],
    overrides: &dyn AlmostCorrectLookup,
    coefficients: &CoefficientTable,
) -> Correction {
    let ctx = CellContext {
        language: memo.language.as_deref(),
        overrides,
    };
    let cell_by_cell = correct_cells(memo.discipline, &memo.data, cells, &ctx);
    let attempted = start_of_emptiness(cells, memo.data.len());
    let raw_score = raw_score(memo.discipline, &cell_by_cell, attempted);
    let points = points(
        memo.discipline,
        memo.memo_time,
        memo.recall_time,
        raw_score,
        coefficients,
    );

    let correction = Correction {
        counts: ItemCounts::tally(&cell_by_cell),
        consecutive: consecutive(&cell_by_cell),
        raw_score,
        points,
        cell_by_cell,
    };
    tracing::debug!(
        memo = %memo.id,
        discipline = %memo.discipline,
        cells = cells.len(),
        attempted,
        correct = correction.counts.correct,
        raw_score,
        %points,
        "corrected recall"
    );
    correction
}
