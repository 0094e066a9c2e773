//! Free-text memo content parser.
//!
//! Turns user-supplied text into validated memo content, renders content
//! back to text, and validates grouping patterns.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::{ContentError, DateLineError};
use crate::model::{DateEntry, Dates, Discipline, MemoContent, DECK_SIZE, FIRST_YEAR, LAST_YEAR};
use crate::pools::normalize_word;
use crate::registry::{checked_language, rules};

/// Parse free text into content for `discipline`.
///
/// Fails on the first problem found; nothing partial is ever returned.
/// Dates get fresh random recall slots from `rng`.
pub fn parse(
    discipline: Discipline,
    text: &str,
    language: Option<&str>,
    rng: &mut dyn RngCore,
) -> Result<MemoContent, ContentError> {
    checked_language(discipline, language)?;
    let content = (rules(discipline).parse)(text, rng)?;
    if content.is_empty() {
        return Err(ContentError::NoContent { discipline });
    }
    Ok(content)
}

pub(crate) fn binary(text: &str, _: &mut dyn RngCore) -> Result<MemoContent, ContentError> {
    digits(Discipline::Base2, 2, text)
}

pub(crate) fn decimal(text: &str, _: &mut dyn RngCore) -> Result<MemoContent, ContentError> {
    digits(Discipline::Base10, 10, text)
}

pub(crate) fn spoken(text: &str, _: &mut dyn RngCore) -> Result<MemoContent, ContentError> {
    digits(Discipline::Spoken, 10, text)
}

/// Digits in reading order; anything that is not an ASCII digit is skipped.
fn digits(discipline: Discipline, radix: u32, text: &str) -> Result<MemoContent, ContentError> {
    text.chars()
        .filter_map(|c| c.to_digit(10).map(|d| (c, d)))
        .map(|(c, d)| {
            if d < radix {
                Ok(d as u8)
            } else {
                Err(ContentError::InvalidDigit {
                    discipline,
                    digit: c,
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(MemoContent::Numbers)
}

/// Comma-separated card numbers in 0..=51.
pub(crate) fn cards(text: &str, _: &mut dyn RngCore) -> Result<MemoContent, ContentError> {
    text.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| match v.parse::<u8>() {
            Ok(card) if card < DECK_SIZE => Ok(card),
            _ => Err(ContentError::InvalidCard {
                discipline: Discipline::Cards,
                value: v.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(MemoContent::Numbers)
}

/// One word per line; lines are trimmed and case-folded, blanks and repeats dropped.
pub(crate) fn words(text: &str, _: &mut dyn RngCore) -> Result<MemoContent, ContentError> {
    let mut seen = HashSet::new();
    let words = text
        .lines()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .filter(|w| seen.insert(w.clone()))
        .collect();
    Ok(MemoContent::Words(words))
}

/// One `<year> <story>` per line. Blank lines are skipped.
pub(crate) fn dates(text: &str, rng: &mut dyn RngCore) -> Result<MemoContent, ContentError> {
    let mut years = HashSet::new();
    let mut stories = HashSet::new();
    let mut parsed = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let invalid = |reason| ContentError::InvalidLine {
            discipline: Discipline::Dates,
            line: number + 1,
            text: line.to_string(),
            reason,
        };

        let (year, story) = line
            .split_once(char::is_whitespace)
            .map(|(y, s)| (y, s.trim()))
            .filter(|(_, s)| !s.is_empty())
            .ok_or_else(|| invalid(DateLineError::MissingStory))?;
        let year: u32 = year
            .parse()
            .map_err(|_| invalid(DateLineError::InvalidYear))?;
        if !(u32::from(FIRST_YEAR)..=u32::from(LAST_YEAR)).contains(&year) {
            return Err(invalid(DateLineError::YearOutOfRange(year)));
        }
        let year = year as u16;
        if !years.insert(year) {
            return Err(invalid(DateLineError::DuplicateYear(year)));
        }
        if !stories.insert(story.to_lowercase()) {
            return Err(invalid(DateLineError::DuplicateStory));
        }
        parsed.push((year, story.to_string()));
    }

    let mut slots: Vec<usize> = (0..parsed.len()).collect();
    slots.shuffle(rng);
    let entries = parsed
        .into_iter()
        .zip(slots)
        .map(|((year, story), recall_slot)| DateEntry {
            year,
            story,
            recall_slot,
        })
        .collect();
    Ok(MemoContent::Dates(Dates::new(entries)?))
}

/// Render content as text that [`parse`] accepts again.
pub fn content_to_text(discipline: Discipline, content: &MemoContent) -> String {
    match content {
        MemoContent::Numbers(items) if discipline == Discipline::Cards => items
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        MemoContent::Numbers(items) => {
            let row = rules(discipline).chunk_size.unwrap_or(items.len().max(1));
            items
                .chunks(row)
                .map(|chunk| chunk.iter().map(u8::to_string).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n")
        }
        MemoContent::Words(items) => items.join("\n"),
        MemoContent::Dates(dates) => dates
            .entries()
            .iter()
            .map(|e| format!("{} {}", e.year, e.story))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Parse a grouping pattern such as `"2, 1"` into group sizes.
///
/// A blank pattern yields no groups.
pub fn parse_pattern(pattern: &str) -> Result<Vec<usize>, ContentError> {
    if pattern.trim().is_empty() {
        return Ok(Vec::new());
    }
    pattern
        .split(',')
        .map(|part| {
            let part = part.trim();
            match part.parse::<usize>() {
                Ok(size) if size >= 1 => Ok(size),
                Ok(_) => Err(ContentError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "group sizes must be at least 1".into(),
                }),
                Err(_) => Err(ContentError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("'{part}' is not a number"),
                }),
            }
        })
        .collect()
}

/// Validate a pattern and return it in canonical `"a,b,c"` form.
pub fn clean_pattern(pattern: &str) -> Result<Option<String>, ContentError> {
    let sizes = parse_pattern(pattern)?;
    if sizes.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        sizes
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(","),
    ))
}

/// Render content for display with items grouped cyclically by `sizes`.
///
/// Digit rows and card lists are grouped; words and dates stay one per
/// line. An empty pattern gives the same text as [`content_to_text`].
pub fn render_grouped(discipline: Discipline, content: &MemoContent, sizes: &[usize]) -> String {
    match content {
        MemoContent::Numbers(items) if !sizes.is_empty() => {
            let row = match discipline {
                Discipline::Cards => items.len().max(1),
                _ => rules(discipline).chunk_size.unwrap_or(items.len().max(1)),
            };
            let separator = if discipline == Discipline::Cards { ", " } else { "" };
            items
                .chunks(row)
                .map(|chunk| {
                    let values: Vec<String> = chunk.iter().map(u8::to_string).collect();
                    group(&values, sizes)
                        .into_iter()
                        .map(|g| g.join(separator))
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        _ => content_to_text(discipline, content),
    }
}

/// Split `items` into consecutive groups, cycling through `sizes`.
///
/// Zero sizes are skipped; with no positive size the items form one group.
fn group<'a>(items: &'a [String], sizes: &[usize]) -> Vec<&'a [String]> {
    let sizes: Vec<usize> = sizes.iter().copied().filter(|&size| size > 0).collect();
    if sizes.is_empty() {
        return vec![items];
    }
    let mut groups = Vec::new();
    let mut rest = items;
    for &size in sizes.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        groups.push(head);
        rest = tail;
    }
    groups
}
