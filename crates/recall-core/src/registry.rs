//! Discipline registry.
//!
//! Maps every [`Discipline`] to the bundle of functions that give it its
//! behavior: content generation, text parsing, cell comparison and raw
//! scoring, plus the constants that parameterize them.

use rand::RngCore;

use crate::corrector::{self, CellContext};
use crate::error::ContentError;
use crate::generator;
use crate::model::{Discipline, Item, MemoContent};
use crate::parser;
use crate::pools::ContentPool;
use crate::scoring;

/// Produces `count` random items for a discipline.
pub type GenerateFn = fn(
    count: usize,
    language: Option<&str>,
    pool: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError>;

/// Parses free text into validated content.
pub type ParseFn = fn(text: &str, rng: &mut dyn RngCore) -> Result<MemoContent, ContentError>;

/// Classifies one non-blank, in-range recall cell.
pub type CompareFn =
    fn(truth: &MemoContent, index: usize, guess: &str, ctx: &CellContext<'_>) -> Item;

/// Turns the attempted prefix of a classification into a raw score.
pub type RawScoreFn = fn(attempted: &[Item], chunk_size: Option<usize>) -> u32;

/// How the points coefficient is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientKey {
    /// Keyed by `"{memo_time},{recall_time}"`, points are `raw * 1000 / k`.
    TimeClass,
    /// A single fixed key; points are `sqrt(raw) * k`.
    Fixed(&'static str),
}

/// The behavior bundle of one discipline.
pub struct DisciplineRules {
    pub discipline: Discipline,
    /// Words and dates pick their content from a language pool.
    pub needs_language: bool,
    /// Size of a scoring row or column, if the discipline scores in chunks.
    pub chunk_size: Option<usize>,
    pub coefficient_key: CoefficientKey,
    pub generate: GenerateFn,
    pub parse: ParseFn,
    pub compare: CompareFn,
    pub raw_score: RawScoreFn,
}

static BASE2: DisciplineRules = DisciplineRules {
    discipline: Discipline::Base2,
    needs_language: false,
    chunk_size: Some(30),
    coefficient_key: CoefficientKey::TimeClass,
    generate: generator::binary,
    parse: parser::binary,
    compare: corrector::compare_number,
    raw_score: scoring::chunked_numbers,
};

static BASE10: DisciplineRules = DisciplineRules {
    discipline: Discipline::Base10,
    needs_language: false,
    chunk_size: Some(40),
    coefficient_key: CoefficientKey::TimeClass,
    generate: generator::decimal,
    parse: parser::decimal,
    compare: corrector::compare_number,
    raw_score: scoring::chunked_numbers,
};

static WORDS: DisciplineRules = DisciplineRules {
    discipline: Discipline::Words,
    needs_language: true,
    chunk_size: Some(20),
    coefficient_key: CoefficientKey::TimeClass,
    generate: generator::words,
    parse: parser::words,
    compare: corrector::compare_word,
    raw_score: scoring::word_columns,
};

static DATES: DisciplineRules = DisciplineRules {
    discipline: Discipline::Dates,
    needs_language: true,
    chunk_size: None,
    coefficient_key: CoefficientKey::TimeClass,
    generate: generator::dates,
    parse: parser::dates,
    compare: corrector::compare_date,
    raw_score: scoring::dates,
};

static SPOKEN: DisciplineRules = DisciplineRules {
    discipline: Discipline::Spoken,
    needs_language: false,
    chunk_size: None,
    coefficient_key: CoefficientKey::Fixed("0,0"),
    generate: generator::decimal,
    parse: parser::spoken,
    compare: corrector::compare_number,
    raw_score: scoring::leading_run,
};

static CARDS: DisciplineRules = DisciplineRules {
    discipline: Discipline::Cards,
    needs_language: false,
    chunk_size: Some(52),
    coefficient_key: CoefficientKey::TimeClass,
    generate: generator::cards,
    parse: parser::cards,
    compare: corrector::compare_number,
    raw_score: scoring::chunked_numbers,
};

/// The rules for `discipline`.
pub fn rules(discipline: Discipline) -> &'static DisciplineRules {
    match discipline {
        Discipline::Base2 => &BASE2,
        Discipline::Base10 => &BASE10,
        Discipline::Words => &WORDS,
        Discipline::Dates => &DATES,
        Discipline::Spoken => &SPOKEN,
        Discipline::Cards => &CARDS,
    }
}

/// Check the language requirement of `discipline`.
///
/// Blank languages count as missing. Returns the trimmed language.
pub fn checked_language(
    discipline: Discipline,
    language: Option<&str>,
) -> Result<Option<&str>, ContentError> {
    let language = language.map(str::trim).filter(|l| !l.is_empty());
    match (rules(discipline).needs_language, language) {
        (true, None) => Err(ContentError::MissingLanguage { discipline }),
        (false, Some(language)) => Err(ContentError::UnexpectedLanguage {
            discipline,
            language: language.to_string(),
        }),
        (_, language) => Ok(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_discipline_has_matching_rules() {
        for d in Discipline::ALL {
            assert_eq!(rules(d).discipline, d);
        }
    }

    #[test]
    fn chunk_sizes() {
        assert_eq!(rules(Discipline::Base2).chunk_size, Some(30));
        assert_eq!(rules(Discipline::Base10).chunk_size, Some(40));
        assert_eq!(rules(Discipline::Words).chunk_size, Some(20));
        assert_eq!(rules(Discipline::Cards).chunk_size, Some(52));
        assert_eq!(rules(Discipline::Dates).chunk_size, None);
    }

    #[test]
    fn spoken_uses_fixed_coefficient_key() {
        assert_eq!(
            rules(Discipline::Spoken).coefficient_key,
            CoefficientKey::Fixed("0,0")
        );
        assert_eq!(
            rules(Discipline::Base10).coefficient_key,
            CoefficientKey::TimeClass
        );
    }

    #[test]
    fn language_requirements() {
        assert_eq!(
            checked_language(Discipline::Words, Some(" english ")).unwrap(),
            Some("english")
        );
        assert!(checked_language(Discipline::Dates, Some("  ")).is_err());
        assert!(checked_language(Discipline::Cards, Some("english")).is_err());
        assert_eq!(checked_language(Discipline::Cards, Some("")).unwrap(), None);
    }
}
