// Rust guideline compliant 2026-02-06

//! Boardtrace Core Library
//!
//! This crate reconstructs the workflow state of issues from their board
//! history:
//! - Stage classification of operator-defined column names (exact + fuzzy)
//! - Per-board event normalization
//! - Regression-aware point-in-time replay
//! - A distinct identity store answering "latest" and "as of" queries
//! - Configuration and error types

pub mod classify;
pub mod config;
pub mod error;
pub mod levels;
pub mod models;
pub mod normalize;
pub mod replay;
pub mod store;

pub use classify::{fuzzy_match, resolve_column, tokenize, StageClassifier};
pub use config::{ColumnMapping, Config};
pub use error::{Error, Result};
pub use levels::Movement;
pub use models::{parse_instant, Event, EventKind, RawIssue, Snapshot, Stage};
pub use normalize::{normalize, NormalizedEvent};
pub use replay::{reconstruct, AsOf};
pub use store::{Board, DistinctStore, EventLog, IssueAsOf};
