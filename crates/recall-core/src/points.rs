//! Points normalization.
//!
//! Raw scores are normalized with a coefficient looked up by discipline and
//! time class. A missing coefficient leaves the attempt unscored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Discipline, Points};
use crate::registry::{rules, CoefficientKey};

/// A coefficient that cannot normalize anything.
#[derive(Debug, Error, PartialEq)]
#[error("coefficient {discipline} '{key}' must be a positive number, got {value}")]
pub struct CoefficientError {
    pub discipline: String,
    pub key: String,
    pub value: f64,
}

type Coefficients = BTreeMap<String, BTreeMap<String, f64>>;

/// `discipline tag -> "memo_time,recall_time" -> k`.
///
/// Every stored coefficient is positive and finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coefficients", into = "Coefficients")]
pub struct CoefficientTable {
    entries: Coefficients,
}

impl CoefficientTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the coefficient for `discipline` at `key`.
    pub fn insert(
        &mut self,
        discipline: &str,
        key: &str,
        value: f64,
    ) -> Result<(), CoefficientError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoefficientError {
                discipline: discipline.to_string(),
                key: key.to_string(),
                value,
            });
        }
        self.entries
            .entry(discipline.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, discipline: &str, key: &str) -> Option<f64> {
        self.entries.get(discipline)?.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }

    /// Number of coefficients across all disciplines.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }
}

impl TryFrom<Coefficients> for CoefficientTable {
    type Error = CoefficientError;

    fn try_from(raw: Coefficients) -> Result<Self, Self::Error> {
        let mut table = CoefficientTable::new();
        for (discipline, keys) in raw {
            for (key, value) in keys {
                table.insert(&discipline, &key, value)?;
            }
        }
        Ok(table)
    }
}

impl From<CoefficientTable> for Coefficients {
    fn from(table: CoefficientTable) -> Self {
        table.entries
    }
}

/// The coefficient key for a memo with the given times.
pub fn time_class(discipline: Discipline, memo_time: u32, recall_time: u32) -> String {
    match rules(discipline).coefficient_key {
        CoefficientKey::TimeClass => format!("{memo_time},{recall_time}"),
        CoefficientKey::Fixed(key) => key.to_string(),
    }
}

/// Normalize `raw_score` into points.
///
/// Fixed-key disciplines use `round(sqrt(raw) * k)`, all others
/// `round(raw * 1000 / k)`. Halves round to even.
pub fn points(
    discipline: Discipline,
    memo_time: u32,
    recall_time: u32,
    raw_score: u32,
    coefficients: &CoefficientTable,
) -> Points {
    let key = time_class(discipline, memo_time, recall_time);
    let Some(k) = coefficients.get(discipline.tag(), &key) else {
        tracing::warn!(%discipline, time_class = %key, "no coefficient, result is unscored");
        return Points::Unscored;
    };
    let raw = f64::from(raw_score);
    let value = match rules(discipline).coefficient_key {
        CoefficientKey::Fixed(_) => raw.sqrt() * k,
        CoefficientKey::TimeClass => raw * 1000.0 / k,
    };
    Points::Scored(value.round_ties_even() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CoefficientTable {
        let mut table = CoefficientTable::new();
        table.insert("base10", "5,15", 500.0).unwrap();
        table.insert("spoken", "0,0", 10.0).unwrap();
        table
    }

    #[test]
    fn linear_points() {
        assert_eq!(
            points(Discipline::Base10, 5, 15, 120, &table()),
            Points::Scored(240)
        );
        // 1000 / 3 rounds down, 2000 / 3 rounds up
        let mut t = CoefficientTable::new();
        t.insert("cards", "5,15", 3.0).unwrap();
        assert_eq!(points(Discipline::Cards, 5, 15, 1, &t), Points::Scored(333));
        assert_eq!(points(Discipline::Cards, 5, 15, 2, &t), Points::Scored(667));
    }

    #[test]
    fn spoken_uses_square_root_and_ignores_times() {
        assert_eq!(
            points(Discipline::Spoken, 1, 99, 49, &table()),
            Points::Scored(70)
        );
        assert_eq!(time_class(Discipline::Spoken, 1, 99), "0,0");
        assert_eq!(time_class(Discipline::Words, 5, 15), "5,15");
    }

    #[test]
    fn halves_round_to_even() {
        let mut t = CoefficientTable::new();
        t.insert("base10", "5,15", 2000.0).unwrap();
        t.insert("spoken", "0,0", 1.25).unwrap();
        // 0.5 and 1.5
        assert_eq!(points(Discipline::Base10, 5, 15, 1, &t), Points::Scored(0));
        assert_eq!(points(Discipline::Base10, 5, 15, 3, &t), Points::Scored(2));
        // sqrt(4) * 1.25 = 2.5
        assert_eq!(points(Discipline::Spoken, 1, 1, 4, &t), Points::Scored(2));
    }

    #[test]
    fn unknown_time_class_is_unscored() {
        assert_eq!(
            points(Discipline::Base10, 7, 15, 120, &table()),
            Points::Unscored
        );
        assert_eq!(
            points(Discipline::Dates, 5, 15, 10, &table()),
            Points::Unscored
        );
    }

    #[test]
    fn zero_raw_score_is_zero_points() {
        assert_eq!(points(Discipline::Base10, 5, 15, 0, &table()), Points::Scored(0));
    }

    #[test]
    fn rejects_non_positive_coefficients() {
        let mut t = CoefficientTable::new();
        assert!(t.insert("base2", "5,15", 0.0).is_err());
        assert!(t.insert("base2", "5,15", -4.0).is_err());
        assert!(t.insert("base2", "5,15", f64::NAN).is_err());
        assert!(t.is_empty());
    }

    #[test]
    fn loads_from_toml() {
        let t: CoefficientTable = toml::from_str(
            r#"
[base2]
"5,15" = 1200.0

[words]
"5,15" = 80.5
"15,30" = 150.0
"#,
        )
        .unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.get("words", "15,30"), Some(150.0));

        let bad = toml::from_str::<CoefficientTable>("[base2]\n\"5,15\" = -1.0\n");
        assert!(bad.is_err());
    }
}
