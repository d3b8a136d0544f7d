// Rust guideline compliant 2026-02-06

//! Core data models for boardtrace.

use crate::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// Canonical workflow stage that board columns are normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    /// The issue has never been placed in a recognized column.
    #[default]
    None,
    /// Work has been proposed but not yet accepted.
    Proposed,
    /// Work has been accepted and is ready to start.
    Accepted,
    /// Work is actively being done.
    #[serde(rename = "In-Progress")]
    InProgress,
    /// Work is stalled on something external.
    Blocked,
    /// Work is complete.
    Done,
    /// The column name could not be resolved to any stage.
    Unmapped,
}

impl Stage {
    /// Returns the canonical wire name of the stage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Proposed => "Proposed",
            Self::Accepted => "Accepted",
            Self::InProgress => "In-Progress",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
            Self::Unmapped => "Unmapped",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "proposed" => Ok(Self::Proposed),
            "accepted" => Ok(Self::Accepted),
            "in-progress" | "in_progress" | "in progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            "unmapped" => Ok(Self::Unmapped),
            _ => Err(crate::Error::InvalidConfig(format!("Unknown stage: {}", s))),
        }
    }
}

/// Kind of an entry in an issue's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The issue's card was placed on a board.
    #[serde(alias = "added_to_project")]
    Added,
    /// The issue's card moved between columns of a board.
    #[serde(alias = "moved_columns_in_project")]
    Moved,
    /// A label was attached.
    Labeled,
    /// A label was detached.
    Unlabeled,
    /// The issue was closed.
    Closed,
    /// The issue was reopened.
    Reopened,
    /// Any other tracker event; ignored by replay.
    #[serde(other)]
    Other,
}

/// One entry in an issue's append-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// When it happened; `None` if the tracker sent no usable instant.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub created_at: Option<DateTime<Utc>>,
    /// Board the event belongs to, for card events.
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub board_id: Option<String>,
    /// Column the card landed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    /// Column the card left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_column_name: Option<String>,
    /// Label attached or detached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_name: Option<String>,
}

impl Event {
    fn bare(kind: EventKind, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            created_at: Some(at),
            board_id: None,
            column_name: None,
            previous_column_name: None,
            label_name: None,
        }
    }

    /// Creates a card-added event placing the issue in `column` of `board`.
    pub fn added(board: &str, column: &str, at: DateTime<Utc>) -> Self {
        Self {
            board_id: Some(board.to_string()),
            column_name: Some(column.to_string()),
            ..Self::bare(EventKind::Added, at)
        }
    }

    /// Creates a card-moved event from column `from` to column `to` of `board`.
    pub fn moved(board: &str, from: &str, to: &str, at: DateTime<Utc>) -> Self {
        Self {
            board_id: Some(board.to_string()),
            column_name: Some(to.to_string()),
            previous_column_name: Some(from.to_string()),
            ..Self::bare(EventKind::Moved, at)
        }
    }

    /// Creates a labeled event.
    pub fn labeled(label: &str, at: DateTime<Utc>) -> Self {
        Self {
            label_name: Some(label.to_string()),
            ..Self::bare(EventKind::Labeled, at)
        }
    }

    /// Creates an unlabeled event.
    pub fn unlabeled(label: &str, at: DateTime<Utc>) -> Self {
        Self {
            label_name: Some(label.to_string()),
            ..Self::bare(EventKind::Unlabeled, at)
        }
    }

    /// Creates a closed event.
    pub fn closed(at: DateTime<Utc>) -> Self {
        Self::bare(EventKind::Closed, at)
    }

    /// Creates a reopened event.
    pub fn reopened(at: DateTime<Utc>) -> Self {
        Self::bare(EventKind::Reopened, at)
    }

    /// Returns true for events that place or move a card on a board.
    pub fn is_card_event(&self) -> bool {
        matches!(self.kind, EventKind::Added | EventKind::Moved)
    }
}

/// Tracker-native projection of an issue as handed over by the crawl layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIssue {
    /// Tracker-wide numeric identifier.
    #[serde(default)]
    pub id: u64,
    /// Repository-local issue number.
    #[serde(default)]
    pub number: u64,
    /// One-line summary.
    pub title: String,
    /// Link to the issue in the tracker UI.
    #[serde(default)]
    pub url: String,
    /// Tracker-reported state (`open`/`closed`) at crawl time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Labels at crawl time.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Assignee logins.
    #[serde(default)]
    pub assignees: Vec<String>,
    /// When the issue was opened.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the issue was last closed, at crawl time.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Full history, oldest first.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl RawIssue {
    /// Creates an issue with only a number, title and history.
    pub fn new(number: u64, title: &str, events: Vec<Event>) -> Self {
        Self {
            id: number,
            number,
            title: title.to_string(),
            url: String::new(),
            state: None,
            labels: Vec::new(),
            assignees: Vec::new(),
            created_at: None,
            closed_at: None,
            events,
        }
    }

    /// Reads one issue per line from a JSONL document.
    ///
    /// Blank lines are ignored. Malformed lines are skipped with a warning so
    /// that one bad record does not discard a whole crawl.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails.
    pub fn from_json_lines<R: BufRead>(reader: R) -> Result<Vec<Self>> {
        let mut issues = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Self>(&line) {
                Ok(issue) => issues.push(issue),
                Err(err) => {
                    tracing::warn!(line = line_no + 1, %err, "skipping malformed issue record");
                }
            }
        }
        Ok(issues)
    }
}

/// Read-only view of an issue's board state at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Stage of the column the card sat in.
    pub project_stage: Stage,
    /// First time the card entered the board.
    pub project_added_at: Option<DateTime<Utc>>,
    /// Most recent entry into Proposed from below.
    pub proposed_at: Option<DateTime<Utc>>,
    /// Most recent entry into Accepted from below.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Most recent entry into In-Progress from below.
    pub in_progress_at: Option<DateTime<Utc>>,
    /// Most recent entry into Done from below.
    pub done_at: Option<DateTime<Utc>>,
    /// Latest close, unless reopened since.
    pub closed_at: Option<DateTime<Utc>>,
    /// Labels attached at the instant, in order of attachment.
    pub labels: Vec<String>,
}

impl Snapshot {
    /// Returns true if the issue was closed at the instant.
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Returns the recorded entry instant for one of the ordered stages.
    pub fn entered_at(&self, stage: Stage) -> Option<DateTime<Utc>> {
        match stage {
            Stage::Proposed => self.proposed_at,
            Stage::Accepted => self.accepted_at,
            Stage::InProgress => self.in_progress_at,
            Stage::Done => self.done_at,
            Stage::None | Stage::Blocked | Stage::Unmapped => None,
        }
    }
}

/// Parses an instant from the textual forms trackers and operators use.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (both read
/// as UTC) and bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn instant_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_instant(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        _ => None,
    }
}

fn lenient_instant<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(instant_from_value))
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
