// Rust guideline compliant 2026-02-06

//! Stage classifier for raw board-column names.
//!
//! A column name resolves in three steps:
//!
//! 1. Exact, case-insensitive match against the configured [`ColumnMapping`],
//!    then against the built-in canonical stage names.
//! 2. Fuzzy match: both names are split into lower-cased word tokens and
//!    match when one token set contains the other. Stages are tried in
//!    declaration order and the first hit wins.
//! 3. Otherwise the column is [`Stage::Unmapped`].
//!
//! [`StageClassifier`] memoizes resolutions, negative ones included, for the
//! lifetime of one run and records every distinct unmapped column so it can
//! be reported once at the end.

use crate::{ColumnMapping, Config, Stage};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Splits a column name into lower-cased alphanumeric word tokens.
///
/// Punctuation, whitespace and emoji all separate tokens and are discarded.
pub fn tokenize(name: &str) -> BTreeSet<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns true if the token set of one name is a subset of the other's.
///
/// Names without any word tokens never match.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let left = tokenize(a);
    let right = tokenize(b);
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left.is_subset(&right) || right.is_subset(&left)
}

/// Folds a column name for exact comparison: trimmed and lower-cased.
pub(crate) fn fold_column(name: &str) -> String {
    name.trim().to_lowercase()
}

fn builtin_stage(folded: &str) -> Option<Stage> {
    match folded {
        "proposed" => Some(Stage::Proposed),
        "accepted" => Some(Stage::Accepted),
        "in-progress" | "in progress" | "in_progress" => Some(Stage::InProgress),
        "blocked" => Some(Stage::Blocked),
        "done" => Some(Stage::Done),
        _ => None,
    }
}

/// Resolves a column name without memoization.
///
/// `fuzzy` enables the word-set fallback.
pub fn resolve_column(name: &str, mapping: &ColumnMapping, fuzzy: bool) -> Stage {
    let folded = fold_column(name);

    for (stage, columns) in mapping.entries() {
        if columns.iter().any(|column| fold_column(column) == folded) {
            return stage;
        }
    }

    if let Some(stage) = builtin_stage(&folded) {
        return stage;
    }

    if fuzzy {
        for (stage, columns) in mapping.entries() {
            if columns.iter().any(|column| fuzzy_match(name, column)) {
                return stage;
            }
        }
    }

    Stage::Unmapped
}

#[derive(Debug, Default)]
struct Resolutions {
    by_column: HashMap<String, Stage>,
    unmapped: Vec<String>,
}

/// Memoizing column classifier owned by a single run.
///
/// Build a fresh classifier whenever the column mapping changes; cached
/// resolutions are only valid for the mapping they were computed with.
#[derive(Debug)]
pub struct StageClassifier {
    mapping: ColumnMapping,
    fuzzy: bool,
    warn_unmapped: bool,
    resolutions: Mutex<Resolutions>,
}

impl StageClassifier {
    /// Creates a classifier with fuzzy matching and warnings enabled.
    pub fn new(mapping: ColumnMapping) -> Self {
        Self {
            mapping,
            fuzzy: true,
            warn_unmapped: true,
            resolutions: Mutex::new(Resolutions::default()),
        }
    }

    /// Creates a classifier from a run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            fuzzy: config.fuzzy_matching,
            warn_unmapped: config.warn_unmapped,
            ..Self::new(config.columns.clone())
        }
    }

    /// Returns the mapping this classifier resolves against.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    fn resolutions(&self) -> MutexGuard<'_, Resolutions> {
        // Entries are idempotent, so a poisoned cache is still consistent.
        self.resolutions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resolves a raw column name, consulting the run cache first.
    ///
    /// The first time a name fails to resolve it is recorded and, unless
    /// disabled, a single warning is logged for it.
    pub fn resolve(&self, column: &str) -> Stage {
        let mut resolutions = self.resolutions();
        if let Some(stage) = resolutions.by_column.get(column) {
            return *stage;
        }

        let stage = resolve_column(column, self.mapping(), self.fuzzy);
        if stage == Stage::Unmapped {
            if self.warn_unmapped {
                tracing::warn!(column, "board column does not map to any workflow stage");
            }
            resolutions.unmapped.push(column.to_string());
        }
        resolutions.by_column.insert(column.to_string(), stage);
        stage
    }

    /// Returns every distinct column that failed to resolve, first seen first.
    pub fn unmapped_columns(&self) -> Vec<String> {
        self.resolutions().unmapped.clone()
    }

    /// Returns the number of distinct column names resolved so far.
    pub fn cached_len(&self) -> usize {
        self.resolutions().by_column.len()
    }
}

impl Default for StageClassifier {
    fn default() -> Self {
        Self::new(ColumnMapping::default())
    }
}
