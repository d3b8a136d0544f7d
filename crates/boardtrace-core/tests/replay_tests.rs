// Rust guideline compliant 2026-02-06

//! Unit tests for point-in-time reconstruction.
//!
//! These tests pin down the regression rules, close/reopen toggling, label
//! accumulation and the handling of Blocked and unmapped columns.

use boardtrace_core::{
    normalize, reconstruct, AsOf, Event, EventKind, Snapshot, Stage, StageClassifier,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

const BOARD: &str = "4412";

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, 14, 19, minute, 0).unwrap()
}

fn replay(events: &[Event], asof: impl Into<AsOf>) -> Snapshot {
    let classifier = StageClassifier::default();
    let normalized = normalize(events, BOARD, &classifier);
    reconstruct(&normalized, &asof.into())
}

/// Proposed(T0) → Accepted(T1) → Proposed(T2) → Accepted(T3) → In-Progress(T4) → Done(T5).
fn regression_history() -> Vec<Event> {
    vec![
        Event::added(BOARD, "Proposed", at(0)),
        Event::moved(BOARD, "Proposed", "Accepted", at(10)),
        Event::moved(BOARD, "Accepted", "Proposed", at(20)),
        Event::moved(BOARD, "Proposed", "Accepted", at(30)),
        Event::moved(BOARD, "Accepted", "In Progress", at(40)),
        Event::moved(BOARD, "In Progress", "Done", at(50)),
    ]
}

#[test]
fn test_nothing_has_happened_before_first_event() {
    let snapshot = replay(&regression_history(), at(0) - Duration::seconds(1));
    assert_eq!(snapshot, Snapshot::default());
    assert_eq!(snapshot.project_stage, Stage::None);
}

#[test]
fn test_regression_clears_only_higher_stages() {
    let events = regression_history();

    let first_accept = replay(&events, at(10));
    assert_eq!(first_accept.project_stage, Stage::Accepted);
    assert_eq!(first_accept.accepted_at, Some(at(10)));

    let regressed = replay(&events, at(20));
    assert_eq!(regressed.project_stage, Stage::Proposed);
    assert_eq!(regressed.proposed_at, Some(at(0)));
    assert_eq!(regressed.accepted_at, None);

    let reaccepted = replay(&events, at(30));
    assert_eq!(reaccepted.project_stage, Stage::Accepted);
    assert_eq!(reaccepted.proposed_at, Some(at(0)));
    assert_eq!(reaccepted.accepted_at, Some(at(30)));

    let started = replay(&events, at(40));
    assert_eq!(started.project_stage, Stage::InProgress);
    assert_eq!(started.accepted_at, Some(at(30)));
    assert_eq!(started.in_progress_at, Some(at(40)));

    let finished = replay(&events, at(50) + Duration::seconds(1));
    assert_eq!(finished.project_stage, Stage::Done);
    assert_eq!(finished.proposed_at, Some(at(0)));
    assert_eq!(finished.accepted_at, Some(at(30)));
    assert_eq!(finished.in_progress_at, Some(at(40)));
    assert_eq!(finished.done_at, Some(at(50)));
    assert_eq!(finished.project_added_at, Some(at(0)));
}

#[test]
fn test_latest_equals_replay_after_last_event() {
    let events = regression_history();
    assert_eq!(replay(&events, AsOf::Latest), replay(&events, at(59)));
}

#[test]
fn test_deep_regression_keeps_target_stamp() {
    let events = vec![
        Event::added(BOARD, "New", at(0)),
        Event::moved(BOARD, "New", "Ready for Work", at(5)),
        Event::moved(BOARD, "Ready for Work", "Active", at(10)),
        Event::moved(BOARD, "Active", "Done", at(15)),
        Event::moved(BOARD, "Done", "Ready for Work", at(20)),
    ];

    let snapshot = replay(&events, AsOf::Latest);

    assert_eq!(snapshot.project_stage, Stage::Accepted);
    assert_eq!(snapshot.proposed_at, Some(at(0)));
    assert_eq!(snapshot.accepted_at, Some(at(5)));
    assert_eq!(snapshot.in_progress_at, None);
    assert_eq!(snapshot.done_at, None);
}

#[test]
fn test_added_at_survives_regressions_and_board_moves() {
    let events = vec![
        Event::moved(BOARD, "New", "Active", at(3)),
        Event::moved(BOARD, "Active", "New", at(4)),
        Event::added(BOARD, "New", at(5)),
    ];

    let snapshot = replay(&events, AsOf::Latest);

    assert_eq!(snapshot.project_added_at, Some(at(3)));
    assert_eq!(snapshot.project_stage, Stage::Proposed);
    assert_eq!(snapshot.in_progress_at, None);
}

#[test]
fn test_added_directly_into_later_stage() {
    let events = vec![Event::added(BOARD, "In Progress", at(1))];

    let snapshot = replay(&events, AsOf::Latest);

    assert_eq!(snapshot.project_stage, Stage::InProgress);
    assert_eq!(snapshot.proposed_at, None);
    assert_eq!(snapshot.accepted_at, None);
    assert_eq!(snapshot.in_progress_at, Some(at(1)));
    assert_eq!(snapshot.entered_at(Stage::InProgress), Some(at(1)));
}

#[test]
fn test_lateral_move_keeps_stamp() {
    let events = vec![
        Event::added(BOARD, "Active", at(1)),
        Event::moved(BOARD, "Active", "Doing", at(2)),
    ];

    let snapshot = replay(&events, AsOf::Latest);

    assert_eq!(snapshot.in_progress_at, Some(at(1)));
}

#[test]
fn test_close_reopen_toggles() {
    let events = vec![
        Event::added(BOARD, "New", at(0)),
        Event::closed(at(10)),
        Event::reopened(at(20)),
        Event::closed(at(30)),
    ];

    assert_eq!(replay(&events, at(5)).closed_at, None);
    assert_eq!(replay(&events, at(10)).closed_at, Some(at(10)));
    assert!(replay(&events, at(15)).is_closed());
    assert_eq!(replay(&events, at(20)).closed_at, None);
    assert_eq!(replay(&events, at(30)).closed_at, Some(at(30)));
}

#[test]
fn test_labels_accumulate_in_event_order() {
    let events = vec![
        Event::labeled("bug", at(1)),
        Event::labeled("ux", at(2)),
        Event::labeled("p1", at(3)),
        Event::unlabeled("UX", at(4)),
        Event::labeled("Bug", at(5)),
        Event::labeled("ux", at(6)),
    ];

    assert_eq!(replay(&events, at(3)).labels, vec!["bug", "ux", "p1"]);
    assert_eq!(replay(&events, at(5)).labels, vec!["bug", "p1"]);
    assert_eq!(replay(&events, AsOf::Latest).labels, vec!["bug", "p1", "ux"]);
}

#[test]
fn test_blocked_keeps_stamps_and_reports_stage() {
    let events = vec![
        Event::added(BOARD, "Active", at(1)),
        Event::moved(BOARD, "Active", "Blocked", at(2)),
        Event::moved(BOARD, "Blocked", "Active", at(3)),
        Event::moved(BOARD, "Active", "On Hold", at(4)),
        Event::moved(BOARD, "On Hold", "Done", at(5)),
    ];

    let blocked = replay(&events, at(2));
    assert_eq!(blocked.project_stage, Stage::Blocked);
    assert_eq!(blocked.in_progress_at, Some(at(1)));

    let resumed = replay(&events, at(3));
    assert_eq!(resumed.project_stage, Stage::InProgress);
    assert_eq!(resumed.in_progress_at, Some(at(1)));

    let done = replay(&events, AsOf::Latest);
    assert_eq!(done.project_stage, Stage::Done);
    assert_eq!(done.in_progress_at, Some(at(1)));
    assert_eq!(done.done_at, Some(at(5)));
}

#[test]
fn test_leaving_blocked_downwards_is_a_regression() {
    let events = vec![
        Event::added(BOARD, "New", at(1)),
        Event::moved(BOARD, "New", "Accepted", at(2)),
        Event::moved(BOARD, "Accepted", "Blocked", at(3)),
        Event::moved(BOARD, "Blocked", "New", at(4)),
    ];

    let snapshot = replay(&events, AsOf::Latest);

    assert_eq!(snapshot.project_stage, Stage::Proposed);
    assert_eq!(snapshot.proposed_at, Some(at(1)));
    assert_eq!(snapshot.accepted_at, None);
}

#[test]
fn test_unmapped_column_keeps_stamps() {
    let events = vec![
        Event::added(BOARD, "Accepted", at(1)),
        Event::moved(BOARD, "Accepted", "QA", at(2)),
        Event::moved(BOARD, "QA", "Done", at(3)),
    ];

    let in_qa = replay(&events, at(2));
    assert_eq!(in_qa.project_stage, Stage::Unmapped);
    assert_eq!(in_qa.accepted_at, Some(at(1)));

    let done = replay(&events, AsOf::Latest);
    assert_eq!(done.project_stage, Stage::Done);
    assert_eq!(done.accepted_at, Some(at(1)));
    assert_eq!(done.done_at, Some(at(3)));
}

#[test]
fn test_events_without_instant_never_apply() {
    let mut undated = Event::closed(at(5));
    undated.created_at = None;
    let events = vec![Event::added(BOARD, "New", at(1)), undated];

    assert_eq!(replay(&events, AsOf::Latest).closed_at, None);
    assert_eq!(replay(&events, at(59)).closed_at, None);
}

#[test]
fn test_unparseable_asof_means_nothing_happened() {
    let asof = AsOf::parse("last tuesday");
    assert_eq!(asof, AsOf::Unparseable("last tuesday".to_string()));
    assert_eq!(replay(&regression_history(), asof), Snapshot::default());
}

#[test]
fn test_asof_accepts_common_formats() {
    let midnight = Utc.with_ymd_and_hms(2020, 7, 14, 0, 0, 0).unwrap();
    assert_eq!(AsOf::parse("2020-07-14"), AsOf::At(midnight));
    assert_eq!(AsOf::parse("2020-07-14 19:05:00"), AsOf::At(at(5)));
    assert_eq!(AsOf::parse("2020-07-14T19:05:00Z"), AsOf::At(at(5)));
    assert_eq!(AsOf::parse("2020-07-14T21:05:00+02:00"), AsOf::At(at(5)));
    assert_eq!(AsOf::from(Some(at(5))), AsOf::At(at(5)));
    assert_eq!(AsOf::from(None::<DateTime<Utc>>), AsOf::Latest);
}

#[test]
fn test_other_event_kinds_are_ignored() {
    let mut assigned = Event::closed(at(2));
    assigned.kind = EventKind::Other;
    let events = vec![Event::added(BOARD, "New", at(1)), assigned];

    let snapshot = replay(&events, AsOf::Latest);

    assert_eq!(snapshot.closed_at, None);
    assert_eq!(snapshot.project_stage, Stage::Proposed);
}
