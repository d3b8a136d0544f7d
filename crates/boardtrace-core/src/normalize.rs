// Rust guideline compliant 2026-02-06

//! Event normalization for a single board.
//!
//! An issue can sit on several boards at once. Normalization keeps only the
//! history of the board being processed and tags each card event with the
//! stages its columns resolve to. Input order is preserved and the input is
//! never modified.

use crate::{Event, Stage, StageClassifier};

/// An event borrowed from an issue's history, tagged with resolved stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedEvent<'a> {
    /// The original event.
    pub event: &'a Event,
    /// Stage of `column_name`, for card events carrying one.
    pub stage: Option<Stage>,
    /// Stage of `previous_column_name`, for card events carrying one.
    pub previous_stage: Option<Stage>,
}

impl<'a> NormalizedEvent<'a> {
    /// Wraps an event without resolving any columns.
    pub fn untagged(event: &'a Event) -> Self {
        Self {
            event,
            stage: None,
            previous_stage: None,
        }
    }
}

/// Returns true if the event belongs to `board_id` or to no board at all.
pub fn is_on_board(event: &Event, board_id: &str) -> bool {
    event
        .board_id
        .as_deref()
        .map_or(true, |owner| owner == board_id)
}

/// Filters `events` down to `board_id` and tags card events with stages.
///
/// Columns are resolved through `classifier`, which records unmapped names
/// for the end-of-run report. Events owned by other boards are dropped
/// silently.
pub fn normalize<'a>(
    events: &'a [Event],
    board_id: &str,
    classifier: &StageClassifier,
) -> Vec<NormalizedEvent<'a>> {
    let normalized: Vec<NormalizedEvent<'a>> = events
        .iter()
        .filter(|event| is_on_board(event, board_id))
        .map(|event| {
            if !event.is_card_event() {
                return NormalizedEvent::untagged(event);
            }
            NormalizedEvent {
                event,
                stage: event
                    .column_name
                    .as_deref()
                    .map(|column| classifier.resolve(column)),
                previous_stage: event
                    .previous_column_name
                    .as_deref()
                    .map(|column| classifier.resolve(column)),
            }
        })
        .collect();

    let foreign = events.len() - normalized.len();
    if foreign > 0 {
        tracing::debug!(board_id, foreign, "dropped events from other boards");
    }

    normalized
}
