//! Word and story pools, and the almost-correct override table.
//!
//! Both are read-only inputs to generation and correction. The core never
//! mutates a pool; override tables are edited by their owner through the
//! store.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Content pools
// ---------------------------------------------------------------------------

/// Source of words and historical-date stories, keyed by language.
pub trait ContentPool: Send + Sync {
    /// All words recorded for `language`.
    fn words(&self, language: &str) -> Vec<String>;

    /// All date stories recorded for `language`.
    fn stories(&self, language: &str) -> Vec<String>;
}

/// In-memory pool, loadable from a TOML file of the form
///
/// ```toml
/// [words]
/// english = ["apple", "river"]
///
/// [stories]
/// english = ["Queen marries again", "Wimbledon cancelled"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagePool {
    #[serde(default)]
    words: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    stories: BTreeMap<String, Vec<String>>,
}

impl LanguagePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a pool from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pool file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse pool file: {}", path.display()))
    }

    /// Parse a pool from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let pool: LanguagePool = toml::from_str(content)?;
        Ok(pool)
    }

    pub fn add_words<I, S>(&mut self, language: &str, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words
            .entry(normalize_language(language))
            .or_default()
            .extend(words.into_iter().map(Into::into));
    }

    pub fn add_stories<I, S>(&mut self, language: &str, stories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stories
            .entry(normalize_language(language))
            .or_default()
            .extend(stories.into_iter().map(Into::into));
    }

    /// Languages that have at least one word or story.
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self
            .words
            .keys()
            .chain(self.stories.keys())
            .map(|l| normalize_language(l))
            .collect();
        langs.sort();
        langs.dedup();
        langs
    }

    fn lookup(map: &BTreeMap<String, Vec<String>>, language: &str) -> Vec<String> {
        let wanted = normalize_language(language);
        map.iter()
            .filter(|(lang, _)| normalize_language(lang) == wanted)
            .flat_map(|(_, values)| values.iter().cloned())
            .collect()
    }
}

impl ContentPool for LanguagePool {
    fn words(&self, language: &str) -> Vec<String> {
        Self::lookup(&self.words, language)
    }

    fn stories(&self, language: &str) -> Vec<String> {
        Self::lookup(&self.stories, language)
    }
}

/// Languages are matched case-insensitively.
pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

/// Words are compared trimmed and case-folded.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Almost-correct overrides
// ---------------------------------------------------------------------------

/// Lookup of near-miss spellings accepted for the Words discipline.
pub trait AlmostCorrectLookup {
    /// Whether `guess` is accepted in place of `truth` under `language`.
    fn accepts(&self, language: &str, truth: &str, guess: &str) -> bool;
}

/// A lookup that accepts nothing.
pub struct NoOverrides;

impl AlmostCorrectLookup for NoOverrides {
    fn accepts(&self, _: &str, _: &str, _: &str) -> bool {
        false
    }
}

/// One user's override table: `(language, truth word) -> accepted spelling`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AlmostCorrectEntry>", into = "Vec<AlmostCorrectEntry>")]
pub struct AlmostCorrectWords {
    entries: Vec<AlmostCorrectEntry>,
    index: HashMap<(String, String), String>,
}

/// A single accepted spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlmostCorrectEntry {
    pub language: String,
    pub truth: String,
    pub accepted: String,
}

impl AlmostCorrectWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `accepted` as almost correct for `truth`, replacing any
    /// earlier spelling for the same word.
    pub fn insert(&mut self, language: &str, truth: &str, accepted: &str) {
        let entry = AlmostCorrectEntry {
            language: normalize_language(language),
            truth: normalize_word(truth),
            accepted: normalize_word(accepted),
        };
        self.entries
            .retain(|e| !(e.language == entry.language && e.truth == entry.truth));
        self.index.insert(
            (entry.language.clone(), entry.truth.clone()),
            entry.accepted.clone(),
        );
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AlmostCorrectEntry] {
        &self.entries
    }
}

impl From<Vec<AlmostCorrectEntry>> for AlmostCorrectWords {
    fn from(entries: Vec<AlmostCorrectEntry>) -> Self {
        let mut table = Self::new();
        for e in entries {
            table.insert(&e.language, &e.truth, &e.accepted);
        }
        table
    }
}

impl From<AlmostCorrectWords> for Vec<AlmostCorrectEntry> {
    fn from(table: AlmostCorrectWords) -> Self {
        table.entries
    }
}

impl AlmostCorrectLookup for AlmostCorrectWords {
    fn accepts(&self, language: &str, truth: &str, guess: &str) -> bool {
        self.index
            .get(&(normalize_language(language), normalize_word(truth)))
            .is_some_and(|accepted| *accepted == normalize_word(guess))
    }
}
