//! Random memo content generation.
//!
//! Every generator draws from the caller's RNG so that seeded runs are
//! reproducible.

use std::collections::HashSet;

use rand::seq::{index, SliceRandom};
use rand::{Rng, RngCore};

use crate::error::ContentError;
use crate::model::{DateEntry, Dates, Discipline, MemoContent, DECK_SIZE, FIRST_YEAR, LAST_YEAR};
use crate::pools::{normalize_word, ContentPool};
use crate::registry::{checked_language, rules};

/// Number of distinct years a dates memo can draw from.
const YEAR_SPAN: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// Generate `count` items of content for `discipline`.
///
/// Words and dates may return fewer items when the pool is smaller than
/// `count`.
pub fn generate(
    discipline: Discipline,
    count: usize,
    language: Option<&str>,
    pool: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    let language = checked_language(discipline, language)?;
    if count == 0 {
        return Err(ContentError::ZeroCount { discipline });
    }
    let content = (rules(discipline).generate)(count, language, pool, rng)?;
    tracing::debug!(%discipline, requested = count, generated = content.len(), "generated content");
    Ok(content)
}

pub(crate) fn binary(
    count: usize,
    _: Option<&str>,
    _: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    Ok(MemoContent::Numbers(digits(2, count, rng)))
}

pub(crate) fn decimal(
    count: usize,
    _: Option<&str>,
    _: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    Ok(MemoContent::Numbers(digits(10, count, rng)))
}

fn digits(radix: u8, count: usize, rng: &mut dyn RngCore) -> Vec<u8> {
    (0..count).map(|_| rng.gen_range(0..radix)).collect()
}

/// Cards come from a deck that is reshuffled every 52 draws, so a card may
/// repeat across a deck boundary but never within one deck.
pub(crate) fn cards(
    count: usize,
    _: Option<&str>,
    _: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    let mut deck: Vec<u8> = (0..DECK_SIZE).collect();
    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        deck.shuffle(&mut *rng);
        let take = (count - drawn.len()).min(deck.len());
        drawn.extend_from_slice(&deck[..take]);
    }
    Ok(MemoContent::Numbers(drawn))
}

pub(crate) fn words(
    count: usize,
    language: Option<&str>,
    pool: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    let language = language.unwrap_or_default();
    let mut candidates = distinct(pool.words(language).iter().map(|w| normalize_word(w)));
    if candidates.is_empty() {
        return Err(ContentError::EmptyPool {
            discipline: Discipline::Words,
            language: language.to_string(),
        });
    }
    candidates.shuffle(&mut *rng);
    candidates.truncate(count);
    Ok(MemoContent::Words(candidates))
}

/// Each story gets a distinct year and an independent recall slot.
pub(crate) fn dates(
    count: usize,
    language: Option<&str>,
    pool: &dyn ContentPool,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    let language = language.unwrap_or_default();
    let mut stories = distinct(pool.stories(language).iter().map(|s| s.trim().to_string()));
    if stories.is_empty() {
        return Err(ContentError::EmptyPool {
            discipline: Discipline::Dates,
            language: language.to_string(),
        });
    }
    stories.shuffle(&mut *rng);
    stories.truncate(count.min(YEAR_SPAN));

    let years = index::sample(&mut *rng, YEAR_SPAN, stories.len());
    let mut slots: Vec<usize> = (0..stories.len()).collect();
    slots.shuffle(&mut *rng);

    let entries = stories
        .into_iter()
        .zip(years.iter())
        .zip(slots)
        .map(|((story, offset), recall_slot)| DateEntry {
            year: FIRST_YEAR + offset as u16,
            story,
            recall_slot,
        })
        .collect();
    Ok(MemoContent::Dates(Dates::new(entries)?))
}

/// Non-empty values in first-seen order. Values differing only in case are
/// repeats, as in the parsers.
fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::LanguagePool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn pool() -> LanguagePool {
        let mut pool = LanguagePool::new();
        pool.add_words(
            "english",
            ["Apple", "river", "lantern", "apple ", "", "cloud", "anchor"],
        );
        pool.add_stories(
            "english",
            [
                "Queen marries again",
                "Wimbledon cancelled",
                "Aircraft carrier sinks",
                "Queen marries again",
            ],
        );
        pool
    }

    #[test]
    fn binary_and_decimal_ranges() {
        let mut rng = rng();
        let MemoContent::Numbers(bits) =
            generate(Discipline::Base2, 500, None, &pool(), &mut rng).unwrap()
        else {
            panic!("expected numbers");
        };
        assert_eq!(bits.len(), 500);
        assert!(bits.iter().all(|&b| b <= 1));
        assert!(bits.contains(&0) && bits.contains(&1));

        let content = generate(Discipline::Spoken, 300, None, &pool(), &mut rng).unwrap();
        assert_eq!(content.len(), 300);
        assert!(content.fits(Discipline::Base10));
    }

    #[test]
    fn cards_are_whole_shuffled_decks() {
        let mut rng = rng();
        let MemoContent::Numbers(cards) =
            generate(Discipline::Cards, 110, None, &pool(), &mut rng).unwrap()
        else {
            panic!("expected numbers");
        };
        assert_eq!(cards.len(), 110);
        for deck in cards.chunks(52).take(2) {
            let mut sorted = deck.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..52).collect::<Vec<u8>>());
        }
        let tail: HashSet<u8> = cards[104..].iter().copied().collect();
        assert_eq!(tail.len(), 6);
    }

    #[test]
    fn words_are_distinct_normalized_and_capped() {
        let mut rng = rng();
        let MemoContent::Words(words) =
            generate(Discipline::Words, 3, Some("English"), &pool(), &mut rng).unwrap()
        else {
            panic!("expected words");
        };
        assert_eq!(words.len(), 3);
        let unique: HashSet<&String> = words.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(words.iter().all(|w| *w == w.to_lowercase()));

        let all = generate(Discipline::Words, 100, Some("english"), &pool(), &mut rng).unwrap();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn dates_have_distinct_years_and_slots() {
        let mut rng = rng();
        let MemoContent::Dates(dates) =
            generate(Discipline::Dates, 10, Some("english"), &pool(), &mut rng).unwrap()
        else {
            panic!("expected dates");
        };
        assert_eq!(dates.len(), 3);
        let years: HashSet<u16> = dates.entries().iter().map(|e| e.year).collect();
        assert_eq!(years.len(), 3);
        assert!(years.iter().all(|y| (FIRST_YEAR..=LAST_YEAR).contains(y)));
        let mut slots: Vec<usize> = dates.entries().iter().map(|e| e.recall_slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn dates_skip_stories_differing_only_in_case() {
        let mut pool = LanguagePool::new();
        pool.add_stories("english", ["Queen marries again", "queen marries again"]);
        let content = generate(Discipline::Dates, 5, Some("english"), &pool, &mut rng()).unwrap();
        assert_eq!(content.len(), 1);

        let text = crate::parser::content_to_text(Discipline::Dates, &content);
        let parsed = crate::parser::parse(Discipline::Dates, &text, Some("english"), &mut rng());
        assert!(parsed.is_ok(), "{parsed:?}");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate(Discipline::Base10, 40, None, &pool(), &mut rng()).unwrap();
        let b = generate(Discipline::Base10, 40, None, &pool(), &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn language_rules() {
        let mut rng = rng();
        assert!(matches!(
            generate(Discipline::Words, 5, None, &pool(), &mut rng),
            Err(ContentError::MissingLanguage { .. })
        ));
        assert!(matches!(
            generate(Discipline::Base10, 5, Some("english"), &pool(), &mut rng),
            Err(ContentError::UnexpectedLanguage { .. })
        ));
        assert!(matches!(
            generate(Discipline::Dates, 5, Some("klingon"), &pool(), &mut rng),
            Err(ContentError::EmptyPool { .. })
        ));
        assert!(matches!(
            generate(Discipline::Cards, 0, None, &pool(), &mut rng),
            Err(ContentError::ZeroCount { .. })
        ));
    }
}
