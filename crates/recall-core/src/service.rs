//! The recall lifecycle on top of a [`RecallRepository`].
//!
//! An attempt is `Open` until a submission asks to lock it. A locked attempt
//! only accepts resubmissions from the memo owner. Every request is
//! validated in full before anything is written, so a rejected request
//! leaves the store as it was.

use chrono::Utc;
use rand::RngCore;
use serde::Serialize;

use crate::engine;
use crate::error::{ContentError, RecallError};
use crate::generator;
use crate::model::{
    Correction, Discipline, MemoContent, MemoData, MemoId, RecallData, RecallId, RecallState,
    RecallSubmission, UserId, Visibility,
};
use crate::parser::{self, clean_pattern, parse_pattern};
use crate::points::CoefficientTable;
use crate::pools::{AlmostCorrectLookup, ContentPool, NoOverrides};
use crate::registry::checked_language;
use crate::store::RecallRepository;

/// Where the content of a new memo comes from.
pub enum MemoSource<'a> {
    /// Draw `count` random items, using `pool` for words and stories.
    Generate {
        count: usize,
        pool: &'a dyn ContentPool,
    },
    /// Parse user-supplied free text.
    Text(&'a str),
    /// Content built elsewhere, e.g. imported from another store.
    Content(MemoContent),
}

/// A request to create a memo.
pub struct MemoRequest<'a> {
    pub owner: UserId,
    pub discipline: Discipline,
    pub memo_time: u32,
    pub recall_time: u32,
    pub language: Option<&'a str>,
    /// Display grouping such as `"2,1"`.
    pub pattern: Option<&'a str>,
    pub source: MemoSource<'a>,
}

/// The outcome of a submission or re-correction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedRecall {
    pub recall: RecallId,
    pub memo: MemoId,
    pub locked: bool,
    pub correction: Correction,
}

/// Memo management and recall correction over a repository.
pub struct RecallService<R> {
    repo: R,
    coefficients: CoefficientTable,
}

impl<R: RecallRepository> RecallService<R> {
    pub fn new(repo: R, coefficients: CoefficientTable) -> Self {
        Self { repo, coefficients }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Give the repository back, e.g. to persist it.
    pub fn into_repository(self) -> R {
        self.repo
    }

    // -----------------------------------------------------------------------
    // Memos
    // -----------------------------------------------------------------------

    /// Create a memo from generated or parsed content.
    pub fn create_memo(
        &mut self,
        request: MemoRequest<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<MemoId, RecallError> {
        let discipline = request.discipline;
        if request.memo_time == 0 || request.recall_time == 0 {
            return Err(ContentError::InvalidTimes { discipline }.into());
        }
        let language = checked_language(discipline, request.language)?;
        let pattern = match request.pattern {
            Some(p) => clean_pattern(p)?,
            None => None,
        };
        let (data, generated) = match request.source {
            MemoSource::Generate { count, pool } => (
                generator::generate(discipline, count, language, pool, rng)?,
                true,
            ),
            MemoSource::Text(text) => (parser::parse(discipline, text, language, rng)?, false),
            MemoSource::Content(content) => {
                if content.is_empty() {
                    return Err(ContentError::NoContent { discipline }.into());
                }
                if !content.fits(discipline) {
                    return Err(ContentError::ContentMismatch { discipline }.into());
                }
                (content, false)
            }
        };

        let id = self.repo.next_memo_id();
        let memo = MemoData {
            id,
            owner: request.owner,
            created_at: Utc::now(),
            discipline,
            memo_time: request.memo_time,
            recall_time: request.recall_time,
            language: language.map(str::to_string),
            pattern,
            data,
            generated,
            visibility: Visibility::default(),
        };
        tracing::info!(
            memo = %id,
            owner = %memo.owner,
            %discipline,
            items = memo.data.len(),
            generated,
            "memo created"
        );
        self.repo.put_memo(memo);
        Ok(id)
    }

    pub fn memo(&self, id: MemoId) -> Result<&MemoData, RecallError> {
        self.repo.memo(id).ok_or(RecallError::MemoNotFound(id))
    }

    /// Memo content as text grouped by its pattern.
    ///
    /// Other users may only read the memo once it is public.
    pub fn export_memo_text(&self, user: UserId, id: MemoId) -> Result<String, RecallError> {
        let memo = self.memo(id)?;
        if memo.owner != user && memo.visibility != Visibility::Public {
            tracing::warn!(%user, memo = %id, visibility = %memo.visibility, "export refused");
            return Err(RecallError::Forbidden { user, memo: id });
        }
        let sizes = match memo.pattern.as_deref() {
            Some(p) => parse_pattern(p)?,
            None => Vec::new(),
        };
        Ok(parser::render_grouped(memo.discipline, &memo.data, &sizes))
    }

    /// Prompts for the recall sheet, one per cell in cell order.
    ///
    /// Dates prompt with their stories in recall order and never show the
    /// years; other disciplines get blank prompts. Any user may read it.
    pub fn recall_sheet(&self, id: MemoId) -> Result<Vec<String>, RecallError> {
        let memo = self.memo(id)?;
        Ok(match &memo.data {
            MemoContent::Dates(dates) => dates
                .in_recall_order()
                .map(|entry| entry.story.clone())
                .collect(),
            content => vec![String::new(); content.len()],
        })
    }

    /// Advance the memo to its next visibility and return it.
    pub fn toggle_visibility(&mut self, user: UserId, id: MemoId) -> Result<Visibility, RecallError> {
        let memo = self.owned_memo(user, id)?;
        let next = memo.visibility.next();
        if let Some(memo) = self.repo.memo_mut(id) {
            memo.visibility = next;
        }
        tracing::info!(memo = %id, visibility = %next, "visibility changed");
        Ok(next)
    }

    /// Delete a memo with all its recalls and corrections. Returns the
    /// number of recalls removed.
    pub fn delete_memo(&mut self, user: UserId, id: MemoId) -> Result<usize, RecallError> {
        self.owned_memo(user, id)?;
        let recalls = self.repo.recalls_for(id);
        for recall in &recalls {
            self.repo.remove_correction(*recall);
            self.repo.remove_recall(*recall);
        }
        self.repo.remove_memo(id);
        tracing::info!(memo = %id, recalls = recalls.len(), "memo deleted");
        Ok(recalls.len())
    }

    // -----------------------------------------------------------------------
    // Recalls
    // -----------------------------------------------------------------------

    /// Store a submission and correct it.
    ///
    /// Resubmitting replaces the user's earlier cells and correction. A
    /// locked attempt rejects everyone but the memo owner, and stays locked.
    pub fn submit(&mut self, submission: RecallSubmission) -> Result<GradedRecall, RecallError> {
        let memo = self.memo(submission.memo)?;
        let existing = self
            .repo
            .find_recall(submission.memo, submission.user)
            .map(|r| (r.id, r.state()));

        if let Some((recall, RecallState::Locked)) = existing {
            if submission.user != memo.owner {
                tracing::warn!(%recall, user = %submission.user, "submission to locked recall rejected");
                return Err(RecallError::Locked(recall));
            }
        }

        let correction = self.grade(memo, &submission.cells);
        let was_locked = matches!(existing, Some((_, RecallState::Locked)));
        let locked = was_locked || submission.lock;
        let id = match existing {
            Some((id, _)) => id,
            None => self.repo.next_recall_id(),
        };

        self.repo.put_recall(RecallData {
            id,
            memo: submission.memo,
            user: submission.user,
            submitted_at: Utc::now(),
            data: submission.cells,
            time_remaining: submission.seconds_remaining,
            locked,
        });
        self.repo.put_correction(id, correction.clone());
        tracing::info!(
            recall = %id,
            memo = %submission.memo,
            user = %submission.user,
            raw_score = correction.raw_score,
            points = %correction.points,
            "recall submitted"
        );
        if locked && !was_locked {
            tracing::info!(recall = %id, "recall locked");
        }

        Ok(GradedRecall {
            recall: id,
            memo: submission.memo,
            locked,
            correction,
        })
    }

    pub fn recall(&self, id: RecallId) -> Result<&RecallData, RecallError> {
        self.repo.recall(id).ok_or(RecallError::RecallNotFound(id))
    }

    pub fn correction(&self, id: RecallId) -> Option<&Correction> {
        self.repo.correction(id)
    }

    /// Recompute and replace the correction of a recall. Owner only; the
    /// lock state is left alone.
    pub fn recorrect(&mut self, user: UserId, id: RecallId) -> Result<GradedRecall, RecallError> {
        let recall = self.recall(id)?;
        let memo = self.owned_memo(user, recall.memo)?;
        let correction = self.grade(memo, &recall.data);
        let graded = GradedRecall {
            recall: id,
            memo: memo.id,
            locked: recall.locked,
            correction,
        };
        self.repo.put_correction(id, graded.correction.clone());
        tracing::info!(recall = %id, raw_score = graded.correction.raw_score, "recall re-corrected");
        Ok(graded)
    }

    /// Remove a recall and its correction. Only the memo owner may do this.
    pub fn delete_recall(&mut self, user: UserId, id: RecallId) -> Result<(), RecallError> {
        let recall = self.recall(id)?;
        self.owned_memo(user, recall.memo)?;
        self.repo.remove_correction(id);
        self.repo.remove_recall(id);
        tracing::info!(recall = %id, "recall deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Overrides
    // -----------------------------------------------------------------------

    /// Accept `word` as almost correct for `truth` in memos owned by `user`.
    pub fn add_almost_correct(&mut self, user: UserId, language: &str, truth: &str, word: &str) {
        self.repo
            .almost_correct_mut(user)
            .insert(language, truth, word);
        tracing::info!(%user, language, truth, word, "almost-correct spelling added");
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn owned_memo(&self, user: UserId, id: MemoId) -> Result<&MemoData, RecallError> {
        let memo = self.memo(id)?;
        if memo.owner != user {
            tracing::warn!(%user, memo = %id, "request by non-owner rejected");
            return Err(RecallError::NotOwner { user, memo: id });
        }
        Ok(memo)
    }

    /// The memo owner's override table decides almost-correct words.
    fn grade(&self, memo: &MemoData, cells: &[String]) -> Correction {
        let overrides: &dyn AlmostCorrectLookup = match self.repo.almost_correct(memo.owner) {
            Some(table) => table,
            None => &NoOverrides,
        };
        engine::correct(memo, cells, overrides, &self.coefficients)
    }
}
