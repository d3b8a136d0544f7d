// Rust guideline compliant 2026-02-06

//! Point-in-time reconstruction of an issue's board state.
//!
//! [`reconstruct`] replays a normalized history up to an optional cutoff and
//! produces a [`Snapshot`]. Card moves follow these rules on the ordered
//! chain (see [`crate::levels`]):
//!
//! - A forward move stamps the target stage with the move's instant.
//! - A regression clears the stamps of every stage above the target and
//!   keeps the target's own stamp and everything below it.
//! - The first card event on the board fixes `project_added_at` for good.
//!
//! Moves into Blocked or an unmapped column change the reported stage but
//! never touch stage stamps. The next move out of them is compared against
//! the last ordered level the card held.

use crate::levels::{Movement, MAX_LEVEL};
use crate::models::parse_instant;
use crate::normalize::NormalizedEvent;
use crate::{EventKind, Snapshot, Stage};
use chrono::{DateTime, Utc};

/// Instant a reconstruction is bounded by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AsOf {
    /// Apply the full history.
    #[default]
    Latest,
    /// Apply only events created at or before the instant.
    At(DateTime<Utc>),
    /// The caller supplied an instant that could not be parsed; no event
    /// counts as having happened.
    Unparseable(String),
}

impl AsOf {
    /// Parses an instant string, keeping the raw text if parsing fails.
    pub fn parse(raw: &str) -> Self {
        parse_instant(raw).map_or_else(|| Self::Unparseable(raw.to_string()), Self::At)
    }

    /// Returns true if an event created at `at` is visible at this cutoff.
    ///
    /// Events without a known instant are never visible.
    pub fn admits(&self, at: Option<DateTime<Utc>>) -> bool {
        match (self, at) {
            (_, None) | (Self::Unparseable(_), _) => false,
            (Self::Latest, Some(_)) => true,
            (Self::At(cutoff), Some(at)) => at <= *cutoff,
        }
    }
}

impl From<DateTime<Utc>> for AsOf {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl From<&str> for AsOf {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for AsOf {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Option<DateTime<Utc>>> for AsOf {
    fn from(at: Option<DateTime<Utc>>) -> Self {
        at.map_or(Self::Latest, Self::At)
    }
}

/// Mutable state carried across one replay.
#[derive(Debug, Default)]
struct Replay {
    stage: Stage,
    level: u8,
    entered: [Option<DateTime<Utc>>; MAX_LEVEL as usize + 1],
    added_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    labels: Vec<String>,
}

impl Replay {
    fn apply(&mut self, normalized: &NormalizedEvent<'_>, at: DateTime<Utc>) {
        let event = normalized.event;
        match event.kind {
            EventKind::Added | EventKind::Moved => {
                self.added_at.get_or_insert(at);
                if let Some(stage) = normalized.stage {
                    self.move_card(stage, normalized.previous_stage, at);
                }
            }
            EventKind::Closed => self.closed_at = Some(at),
            EventKind::Reopened => self.closed_at = None,
            EventKind::Labeled => {
                if let Some(label) = event.label_name.as_deref() {
                    if !self.has_label(label) {
                        self.labels.push(label.to_string());
                    }
                }
            }
            EventKind::Unlabeled => {
                if let Some(label) = event.label_name.as_deref() {
                    self.labels.retain(|held| !held.eq_ignore_ascii_case(label));
                }
            }
            EventKind::Other => {}
        }
    }

    fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|held| held.eq_ignore_ascii_case(label))
    }

    fn move_card(&mut self, to: Stage, from: Option<Stage>, at: DateTime<Utc>) {
        self.stage = to;
        let Some(to_level) = to.level() else {
            return;
        };
        let from_level = from.and_then(Stage::level).unwrap_or(self.level);

        match Movement::between(from_level, to_level) {
            Movement::Forward => self.entered[usize::from(to_level)] = Some(at),
            Movement::Regression => {
                for stamp in &mut self.entered[usize::from(to_level) + 1..] {
                    *stamp = None;
                }
            }
            Movement::Lateral => {}
        }
        self.level = to_level;
    }

    fn entered_at(&self, stage: Stage) -> Option<DateTime<Utc>> {
        stage
            .level()
            .and_then(|level| self.entered[usize::from(level)])
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot {
            project_stage: self.stage,
            project_added_at: self.added_at,
            proposed_at: self.entered_at(Stage::Proposed),
            accepted_at: self.entered_at(Stage::Accepted),
            in_progress_at: self.entered_at(Stage::InProgress),
            done_at: self.entered_at(Stage::Done),
            closed_at: self.closed_at,
            labels: self.labels,
        }
    }
}

/// Replays `events` in order up to `asof` and returns the resulting state.
///
/// Events must already be sorted by creation instant, oldest first. Events
/// without a known instant are skipped.
pub fn reconstruct(events: &[NormalizedEvent<'_>], asof: &AsOf) -> Snapshot {
    let mut replay = Replay::default();
    for normalized in events {
        let at = normalized.event.created_at;
        if !asof.admits(at) {
            continue;
        }
        if let Some(at) = at {
            replay.apply(normalized, at);
        }
    }
    replay.into_snapshot()
}
