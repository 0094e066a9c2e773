//! Core data model types for recall.
//!
//! These are the fundamental types the whole system uses to represent
//! memorization tasks, recall attempts and their corrections.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Earliest year a historical date may carry.
pub const FIRST_YEAR: u16 = 1000;
/// Latest year a historical date may carry.
pub const LAST_YEAR: u16 = 2099;
/// Number of cards in one deck.
pub const DECK_SIZE: u8 = 52;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let digits = s.strip_prefix($prefix).unwrap_or(s);
                digits
                    .parse::<u64>()
                    .map($name)
                    .map_err(|_| format!("invalid {}: {s}", stringify!($name)))
            }
        }
    };
}

id_type!(
    /// Identifier of a stored memorization task.
    MemoId,
    "m"
);
id_type!(
    /// Identifier of a stored recall attempt.
    RecallId,
    "r"
);
id_type!(
    /// Identifier of a competitor or memo owner.
    UserId,
    "u"
);

// ---------------------------------------------------------------------------
// Discipline
// ---------------------------------------------------------------------------

/// A memory-sport discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Base2,
    Base10,
    Words,
    Dates,
    Spoken,
    Cards,
}

impl Discipline {
    /// All disciplines, in registry order.
    pub const ALL: [Discipline; 6] = [
        Discipline::Base2,
        Discipline::Base10,
        Discipline::Words,
        Discipline::Dates,
        Discipline::Spoken,
        Discipline::Cards,
    ];

    /// Stable machine tag, also the key into the coefficient table.
    pub fn tag(self) -> &'static str {
        match self {
            Discipline::Base2 => "base2",
            Discipline::Base10 => "base10",
            Discipline::Words => "words",
            Discipline::Dates => "dates",
            Discipline::Spoken => "spoken",
            Discipline::Cards => "cards",
        }
    }

    /// Human-readable federation name.
    pub fn title(self) -> &'static str {
        match self {
            Discipline::Base2 => "Binary Numbers",
            Discipline::Base10 => "Decimal Numbers",
            Discipline::Words => "Words",
            Discipline::Dates => "Historical Dates",
            Discipline::Spoken => "Spoken Numbers",
            Discipline::Cards => "Playing Cards",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base2" | "binary" => Ok(Discipline::Base2),
            "base10" | "decimal" | "numbers" => Ok(Discipline::Base10),
            "words" => Ok(Discipline::Words),
            "dates" | "historical-dates" => Ok(Discipline::Dates),
            "spoken" | "spoken-numbers" => Ok(Discipline::Spoken),
            "cards" => Ok(Discipline::Cards),
            other => Err(format!("unknown discipline: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Memo content
// ---------------------------------------------------------------------------

/// One historical date: a year, a story, and the row it is asked on during recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub year: u16,
    pub story: String,
    pub recall_slot: usize,
}

/// Historical dates in memorization order.
///
/// The recall sheet shows the stories in a different order than the
/// memorization sheet; `recall_slot` is a permutation of `0..len` and the
/// slot index is built once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DateEntry>", into = "Vec<DateEntry>")]
pub struct Dates {
    entries: Vec<DateEntry>,
    by_slot: Vec<usize>,
}

impl Dates {
    /// Build from entries, checking that the recall slots form a permutation.
    pub fn new(entries: Vec<DateEntry>) -> Result<Self, ContentError> {
        let mut by_slot = vec![usize::MAX; entries.len()];
        for (index, entry) in entries.iter().enumerate() {
            match by_slot.get_mut(entry.recall_slot) {
                Some(slot) if *slot == usize::MAX => *slot = index,
                _ => {
                    return Err(ContentError::InvalidRecallSlot {
                        slot: entry.recall_slot,
                        len: entries.len(),
                    })
                }
            }
        }
        Ok(Self { entries, by_slot })
    }

    pub fn entries(&self) -> &[DateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry shown on recall row `slot`.
    pub fn at_slot(&self, slot: usize) -> Option<&DateEntry> {
        self.by_slot.get(slot).map(|&index| &self.entries[index])
    }

    /// Entries in recall-sheet order.
    pub fn in_recall_order(&self) -> impl Iterator<Item = &DateEntry> + '_ {
        self.by_slot.iter().map(move |&index| &self.entries[index])
    }
}

impl TryFrom<Vec<DateEntry>> for Dates {
    type Error = ContentError;

    fn try_from(entries: Vec<DateEntry>) -> Result<Self, Self::Error> {
        Dates::new(entries)
    }
}

impl From<Dates> for Vec<DateEntry> {
    fn from(dates: Dates) -> Self {
        dates.entries
    }
}

/// The truth sequence of a memo.
///
/// Binary, decimal and spoken digits as well as cards (0..52) are stored as
/// small integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum MemoContent {
    Numbers(Vec<u8>),
    Words(Vec<String>),
    Dates(Dates),
}

impl MemoContent {
    pub fn len(&self) -> usize {
        match self {
            MemoContent::Numbers(items) => items.len(),
            MemoContent::Words(items) => items.len(),
            MemoContent::Dates(dates) => dates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this content shape belongs to `discipline`.
    pub fn fits(&self, discipline: Discipline) -> bool {
        match self {
            MemoContent::Numbers(items) => {
                let limit = match discipline {
                    Discipline::Base2 => 2,
                    Discipline::Base10 | Discipline::Spoken => 10,
                    Discipline::Cards => DECK_SIZE,
                    Discipline::Words | Discipline::Dates => return false,
                };
                items.iter().all(|&n| n < limit)
            }
            MemoContent::Words(_) => discipline == Discipline::Words,
            MemoContent::Dates(_) => discipline == Discipline::Dates,
        }
    }
}

// ---------------------------------------------------------------------------
// Memo and recall records
// ---------------------------------------------------------------------------

/// Who may see a memo's content besides its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Competition,
    Public,
}

impl Visibility {
    /// Private -> Competition -> Public -> Private.
    pub fn next(self) -> Self {
        match self {
            Visibility::Private => Visibility::Competition,
            Visibility::Competition => Visibility::Public,
            Visibility::Public => Visibility::Private,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Competition => write!(f, "competition"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

/// A memorization task.
///
/// Content, times and language are fixed once the memo is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoData {
    pub id: MemoId,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub discipline: Discipline,
    pub memo_time: u32,
    pub recall_time: u32,
    #[serde(default)]
    pub language: Option<String>,
    /// Visual grouping such as `"2,1"`. Never used for scoring.
    #[serde(default)]
    pub pattern: Option<String>,
    pub data: MemoContent,
    pub generated: bool,
    #[serde(default)]
    pub visibility: Visibility,
}

/// Whether a recall attempt still accepts submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecallState {
    Open,
    Locked,
}

/// One competitor's attempt at a memo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallData {
    pub id: RecallId,
    pub memo: MemoId,
    pub user: UserId,
    pub submitted_at: DateTime<Utc>,
    /// Raw cell contents, one per UI cell.
    pub data: Vec<String>,
    pub time_remaining: f64,
    pub locked: bool,
}

impl RecallData {
    pub fn state(&self) -> RecallState {
        if self.locked {
            RecallState::Locked
        } else {
            RecallState::Open
        }
    }
}

/// A recall submission as handed over by the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallSubmission {
    pub memo: MemoId,
    pub user: UserId,
    #[serde(default)]
    pub lock: bool,
    pub cells: Vec<String>,
    #[serde(default)]
    pub seconds_remaining: f64,
}

// ---------------------------------------------------------------------------
// Correction
// ---------------------------------------------------------------------------

/// Outcome of a single recall cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    OffLimits,
    Gap,
    NotReached,
    Correct,
    Wrong,
    AlmostCorrect,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Item::OffLimits => "off_limits",
            Item::Gap => "gap",
            Item::NotReached => "not_reached",
            Item::Correct => "correct",
            Item::Wrong => "wrong",
            Item::AlmostCorrect => "almost_correct",
        };
        f.write_str(name)
    }
}

/// Per-outcome tallies of a classified recall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
    pub off_limits: usize,
    pub gap: usize,
    pub not_reached: usize,
    pub correct: usize,
    pub wrong: usize,
    pub almost_correct: usize,
}

impl ItemCounts {
    pub fn tally(items: &[Item]) -> Self {
        let mut counts = Self::default();
        for item in items {
            counts.add(*item);
        }
        counts
    }

    pub fn add(&mut self, item: Item) {
        match item {
            Item::OffLimits => self.off_limits += 1,
            Item::Gap => self.gap += 1,
            Item::NotReached => self.not_reached += 1,
            Item::Correct => self.correct += 1,
            Item::Wrong => self.wrong += 1,
            Item::AlmostCorrect => self.almost_correct += 1,
        }
    }
}

/// Normalized points, or `Unscored` when the time class has no coefficient.
///
/// Serialized as a plain integer with `-1` meaning unscored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Points {
    Scored(i64),
    Unscored,
}

impl Points {
    pub fn value(self) -> Option<i64> {
        match self {
            Points::Scored(p) => Some(p),
            Points::Unscored => None,
        }
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        if value < 0 {
            Points::Unscored
        } else {
            Points::Scored(value)
        }
    }
}

impl From<Points> for i64 {
    fn from(points: Points) -> Self {
        points.value().unwrap_or(-1)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Points::Scored(p) => write!(f, "{p}"),
            Points::Unscored => write!(f, "unscored"),
        }
    }
}

/// The graded result of one recall. Always recomputable from its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(flatten)]
    pub counts: ItemCounts,
    /// Length of the leading run of correct cells.
    pub consecutive: usize,
    pub raw_score: u32,
    pub points: Points,
    pub cell_by_cell: Vec<Item>,
}
