//! Record storage.
//!
//! Memos, recalls and corrections live in id-keyed maps and refer to each
//! other by id only. [`InMemoryStore`] can be snapshotted to JSON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Correction, MemoData, MemoId, RecallData, RecallId, UserId};
use crate::pools::AlmostCorrectWords;

// ---------------------------------------------------------------------------
// Repository trait
// ---------------------------------------------------------------------------

/// Id-based access to stored records.
///
/// Implementations do no validation; ownership and lock rules live in
/// [`crate::service::RecallService`].
pub trait RecallRepository {
    /// Reserve a fresh memo id.
    fn next_memo_id(&mut self) -> MemoId;
    /// Reserve a fresh recall id.
    fn next_recall_id(&mut self) -> RecallId;

    fn memo(&self, id: MemoId) -> Option<&MemoData>;
    fn memo_mut(&mut self, id: MemoId) -> Option<&mut MemoData>;
    fn put_memo(&mut self, memo: MemoData);
    fn remove_memo(&mut self, id: MemoId) -> Option<MemoData>;
    fn memos(&self) -> Vec<&MemoData>;

    fn recall(&self, id: RecallId) -> Option<&RecallData>;
    /// The attempt of `user` on `memo`, if any.
    fn find_recall(&self, memo: MemoId, user: UserId) -> Option<&RecallData>;
    fn put_recall(&mut self, recall: RecallData);
    fn remove_recall(&mut self, id: RecallId) -> Option<RecallData>;
    fn recalls_for(&self, memo: MemoId) -> Vec<RecallId>;

    fn correction(&self, recall: RecallId) -> Option<&Correction>;
    fn put_correction(&mut self, recall: RecallId, correction: Correction);
    fn remove_correction(&mut self, recall: RecallId) -> Option<Correction>;

    /// The almost-correct overrides kept by `user`.
    fn almost_correct(&self, user: UserId) -> Option<&AlmostCorrectWords>;
    fn almost_correct_mut(&mut self, user: UserId) -> &mut AlmostCorrectWords;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A map-backed repository that persists as a single JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    #[serde(default)]
    last_memo: u64,
    #[serde(default)]
    last_recall: u64,
    #[serde(default)]
    memos: BTreeMap<MemoId, MemoData>,
    #[serde(default)]
    recalls: BTreeMap<RecallId, RecallData>,
    #[serde(default)]
    corrections: BTreeMap<RecallId, Correction>,
    #[serde(default)]
    almost_correct: BTreeMap<UserId, AlmostCorrectWords>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the store as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize store")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write store to {}", path.display()))?;
        Ok(())
    }

    /// Load a store from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read store from {}", path.display()))?;
        let store: InMemoryStore = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse store {}", path.display()))?;
        Ok(store)
    }

    /// Load `path` if it exists, otherwise start empty.
    pub fn open(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            Ok(Self::new())
        }
    }
}

impl RecallRepository for InMemoryStore {
    fn next_memo_id(&mut self) -> MemoId {
        self.last_memo += 1;
        MemoId(self.last_memo)
    }

    fn next_recall_id(&mut self) -> RecallId {
        self.last_recall += 1;
        RecallId(self.last_recall)
    }

    fn memo(&self, id: MemoId) -> Option<&MemoData> {
        self.memos.get(&id)
    }

    fn memo_mut(&mut self, id: MemoId) -> Option<&mut MemoData> {
        self.memos.get_mut(&id)
    }

    fn put_memo(&mut self, memo: MemoData) {
        self.memos.insert(memo.id, memo);
    }

    fn remove_memo(&mut self, id: MemoId) -> Option<MemoData> {
        self.memos.remove(&id)
    }

    fn memos(&self) -> Vec<&MemoData> {
        self.memos.values().collect()
    }

    fn recall(&self, id: RecallId) -> Option<&RecallData> {
        self.recalls.get(&id)
    }

    fn find_recall(&self, memo: MemoId, user: UserId) -> Option<&RecallData> {
        self.recalls
            .values()
            .find(|r| r.memo == memo && r.user == user)
    }

    fn put_recall(&mut self, recall: RecallData) {
        self.recalls.insert(recall.id, recall);
    }

    fn remove_recall(&mut self, id: RecallId) -> Option<RecallData> {
        self.recalls.remove(&id)
    }

    fn recalls_for(&self, memo: MemoId) -> Vec<RecallId> {
        self.recalls
            .values()
            .filter(|r| r.memo == memo)
            .map(|r| r.id)
            .collect()
    }

    fn correction(&self, recall: RecallId) -> Option<&Correction> {
        self.corrections.get(&recall)
    }

    fn put_correction(&mut self, recall: RecallId, correction: Correction) {
        self.corrections.insert(recall, correction);
    }

    fn remove_correction(&mut self, recall: RecallId) -> Option<Correction> {
        self.corrections.remove(&recall)
    }

    fn almost_correct(&self, user: UserId) -> Option<&AlmostCorrectWords> {
        self.almost_correct.get(&user)
    }

    fn almost_correct_mut(&mut self, user: UserId) -> &mut AlmostCorrectWords {
        self.almost_correct.entry(user).or_default()
    }
}
