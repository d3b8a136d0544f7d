// Rust guideline compliant 2026-02-06

//! Distinct identity store for crawled issues.
//!
//! The store keeps the first item added for every identity key, in insertion
//! order. Items that carry their own history ([`EventLog`]) can be queried
//! as of any instant; the history is replayed on every query and nothing is
//! cached per instant.

use crate::normalize::normalize;
use crate::replay::{reconstruct, AsOf};
use crate::{Event, RawIssue, Result, Snapshot, StageClassifier};
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Items exposing an append-only event history, oldest first.
pub trait EventLog {
    /// Returns the item's history.
    fn events(&self) -> &[Event];
}

impl EventLog for RawIssue {
    fn events(&self) -> &[Event] {
        &self.events
    }
}

/// The board a replay is scoped to, with the run's classifier.
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    id: &'a str,
    classifier: &'a StageClassifier,
}

impl<'a> Board<'a> {
    /// Creates a board scope.
    pub fn new(id: &'a str, classifier: &'a StageClassifier) -> Self {
        Self { id, classifier }
    }

    /// Returns the board identifier.
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Returns the classifier used to resolve this board's columns.
    pub fn classifier(&self) -> &'a StageClassifier {
        self.classifier
    }

    /// Normalizes `events` for this board and replays them up to `asof`.
    pub fn snapshot(&self, events: &[Event], asof: &AsOf) -> Snapshot {
        let normalized = normalize(events, self.id(), self.classifier());
        reconstruct(&normalized, asof)
    }
}

/// A stored item paired with its state at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueAsOf<'a, T> {
    /// The stored item, unchanged.
    pub issue: &'a T,
    /// State reconstructed for the requested instant.
    pub snapshot: Snapshot,
}

impl<T: Serialize> IssueAsOf<'_, T> {
    /// Serializes the item with the snapshot fields merged over it.
    ///
    /// Snapshot fields win over item fields of the same name. An item that
    /// does not serialize to an object is placed under `"item"`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn merged(&self) -> Result<Value> {
        let mut fields = match serde_json::to_value(self.issue)? {
            Value::Object(fields) => fields,
            other => {
                let mut fields = Map::new();
                fields.insert("item".to_string(), other);
                fields
            }
        };
        if let Value::Object(snapshot) = serde_json::to_value(&self.snapshot)? {
            fields.extend(snapshot);
        }
        Ok(Value::Object(fields))
    }
}

/// Insertion-ordered collection of items, unique by a caller-supplied key.
pub struct DistinctStore<T, K, F>
where
    F: Fn(&T) -> K,
{
    identity: F,
    items: Vec<T>,
    index: HashMap<K, usize>,
}

impl<T, K, F> DistinctStore<T, K, F>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    /// Creates an empty store keyed by `identity`.
    pub fn new(identity: F) -> Self {
        Self {
            identity,
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds an item unless its key is already present.
    ///
    /// # Returns
    ///
    /// True if the item was inserted, false if it was a duplicate. The first
    /// item added for a key is never replaced.
    pub fn add(&mut self, item: T) -> bool {
        let key = (self.identity)(&item);
        if self.index.contains_key(&key) {
            tracing::debug!("discarding duplicate item");
            return false;
        }
        self.index.insert(key, self.items.len());
        self.items.push(item);
        true
    }

    /// Adds a batch of items left to right.
    ///
    /// Later duplicates inside the batch are discarded like any other.
    ///
    /// # Returns
    ///
    /// True if at least one item was inserted.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .fold(false, |inserted, item| self.add(item) || inserted)
    }

    /// Returns all items in insertion order.
    pub fn get_items(&self) -> &[T] {
        &self.items
    }

    /// Returns the item stored under `key`.
    pub fn get_item<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&position| &self.items[position])
    }

    /// Returns true if an item is stored under `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the keys of all items in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.items.iter().map(&self.identity)
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T, K, F> DistinctStore<T, K, F>
where
    T: EventLog,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    /// Reconstructs the item stored under `key` as of `asof` on `board`.
    ///
    /// `asof` accepts an instant, an instant string, or [`AsOf`] directly.
    /// A string that does not parse yields the "nothing happened yet"
    /// snapshot rather than an error.
    ///
    /// # Returns
    ///
    /// `None` if no item is stored under `key`.
    pub fn get_item_asof<Q, A>(
        &self,
        key: &Q,
        asof: A,
        board: &Board<'_>,
    ) -> Option<IssueAsOf<'_, T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        A: Into<AsOf>,
    {
        let asof = asof.into();
        self.get_item(key).map(|issue| IssueAsOf {
            issue,
            snapshot: board.snapshot(issue.events(), &asof),
        })
    }

    /// Reconstructs the item stored under `key` from its full history.
    pub fn latest<Q>(&self, key: &Q, board: &Board<'_>) -> Option<IssueAsOf<'_, T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_item_asof(key, AsOf::Latest, board)
    }

    /// Reconstructs every item as of `asof`, in insertion order.
    pub fn snapshots_asof<'s, A>(
        &'s self,
        asof: A,
        board: &'s Board<'s>,
    ) -> impl Iterator<Item = IssueAsOf<'s, T>> + 's
    where
        A: Into<AsOf>,
    {
        let asof = asof.into();
        self.items.iter().map(move |issue| IssueAsOf {
            issue,
            snapshot: board.snapshot(issue.events(), &asof),
        })
    }
}
