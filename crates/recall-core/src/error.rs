//! Error types for content validation and the recall lifecycle.
//!
//! A missing coefficient is not an error: it yields `Points::Unscored`.

use thiserror::Error;

use crate::model::{Discipline, MemoId, RecallId, UserId};

/// Errors raised while generating, parsing or validating memo content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Words and dates need a language to pick pool entries from.
    #[error("{discipline}: a language is required")]
    MissingLanguage { discipline: Discipline },

    /// Language-independent disciplines must not carry a language.
    #[error("{discipline}: language '{language}' given but the discipline takes none")]
    UnexpectedLanguage {
        discipline: Discipline,
        language: String,
    },

    /// The word or story pool has nothing for the language.
    #[error("{discipline}: the pool has no entries for language '{language}'")]
    EmptyPool {
        discipline: Discipline,
        language: String,
    },

    /// A generation request for zero items.
    #[error("{discipline}: count must be at least 1")]
    ZeroCount { discipline: Discipline },

    /// Free text produced no items.
    #[error("{discipline}: no items found in text")]
    NoContent { discipline: Discipline },

    /// A digit that does not belong to the discipline's radix.
    #[error("{discipline}: '{digit}' is not a valid digit")]
    InvalidDigit { discipline: Discipline, digit: char },

    /// A card value that is not an integer in 0..=51.
    #[error("{discipline}: '{value}' is not a card between 0 and 51")]
    InvalidCard {
        discipline: Discipline,
        value: String,
    },

    /// A malformed historical-dates line.
    #[error("{discipline}, line {line}: {reason}: '{text}'")]
    InvalidLine {
        discipline: Discipline,
        line: usize,
        text: String,
        reason: DateLineError,
    },

    /// Recall slots of a dates memo are not a permutation.
    #[error("recall slot {slot} is out of range or repeated (len {len})")]
    InvalidRecallSlot { slot: usize, len: usize },

    /// The content shape does not belong to the discipline.
    #[error("{discipline}: content does not match the discipline")]
    ContentMismatch { discipline: Discipline },

    /// Memorization and recall times must be positive.
    #[error("{discipline}: memo_time and recall_time must be positive")]
    InvalidTimes { discipline: Discipline },

    /// A grouping pattern that is not a list of positive integers.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Why a historical-dates line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateLineError {
    #[error("expected '<year> <story>'")]
    MissingStory,

    #[error("year is not a number")]
    InvalidYear,

    #[error("year {0} is outside 1000..=2099")]
    YearOutOfRange(u32),

    #[error("year {0} appears more than once")]
    DuplicateYear(u16),

    #[error("story appears more than once")]
    DuplicateStory,
}

/// Errors returned by the recall service.
#[derive(Debug, Error)]
pub enum RecallError {
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A non-owner submitted to a locked recall.
    #[error("recall {0} is locked")]
    Locked(RecallId),

    #[error("memo {0} not found")]
    MemoNotFound(MemoId),

    #[error("recall {0} not found")]
    RecallNotFound(RecallId),

    /// The operation is reserved for the memo owner.
    #[error("user {user} does not own memo {memo}")]
    NotOwner { user: UserId, memo: MemoId },

    /// The memo is not visible to this user.
    #[error("memo {memo} is not public to user {user}")]
    Forbidden { user: UserId, memo: MemoId },
}

impl RecallError {
    /// Returns `true` for unknown memo or recall ids.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecallError::MemoNotFound(_) | RecallError::RecallNotFound(_)
        )
    }

    /// Returns `true` if the request was refused without touching state.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RecallError::Locked(_) | RecallError::NotOwner { .. } | RecallError::Forbidden { .. }
        )
    }
}
