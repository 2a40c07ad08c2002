//! State-change history tracking.
//!
//! The engine can keep a bounded log of the state changes it performed.
//! Each record carries what the debug log prints: the leaf left, the leaf
//! entered, the state whose transition won, the event consumed and the guard
//! outcome.

use super::state::{Event, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What moved the active leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// `start()`, including a restart of a running machine
    Start,
    /// `stop()`
    Stop,
    /// A transition fired during `update()`
    Transition,
}

impl ChangeKind {
    /// Lowercase name used in log records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Start => "start",
            ChangeKind::Stop => "stop",
            ChangeKind::Transition => "transition",
        }
    }
}

/// Record of a single change of the active leaf.
///
/// `from` is `None` when a stopped machine was started, `to` is `None` when
/// it was stopped. `source` is the state owning the winning transition,
/// absent for start and stop.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use hfsm::core::{ChangeKind, StateChange};
///
/// let change: StateChange<u8, &'static str> = StateChange {
///     kind: ChangeKind::Start,
///     from: None,
///     to: Some(1),
///     source: None,
///     event: None,
///     guard_result: None,
///     timestamp: Utc::now(),
/// };
/// assert!(change.is_start());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateChange<S, E> {
    pub kind: ChangeKind,
    /// Leaf active before the change
    pub from: Option<S>,
    /// Leaf active after the change
    pub to: Option<S>,
    /// State whose transition fired
    pub source: Option<S>,
    /// Event consumed on the tick, if the transition was event-triggered
    pub event: Option<E>,
    /// Outcome of the winning transition's guard, `None` if it had none
    pub guard_result: Option<bool>,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

impl<S, E> StateChange<S, E> {
    /// Whether `start()` produced this record.
    ///
    /// Also true for a restart, where `from` holds the leaf that was active.
    pub fn is_start(&self) -> bool {
        self.kind == ChangeKind::Start
    }

    /// Whether `start()` was called on an already running machine.
    pub fn is_restart(&self) -> bool {
        self.is_start() && self.from.is_some()
    }

    /// Whether `stop()` produced this record.
    pub fn is_stop(&self) -> bool {
        self.kind == ChangeKind::Stop
    }
}

/// Bounded, ordered history of state changes.
///
/// When the capacity is reached the oldest record is dropped. A capacity of
/// zero keeps nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, E: Serialize",
    deserialize = "S: Deserialize<'de>, E: Deserialize<'de>"
))]
pub struct StateHistory<S, E> {
    capacity: usize,
    changes: VecDeque<StateChange<S, E>>,
}

impl<S: StateId, E: Event> StateHistory<S, E> {
    /// Create an empty history keeping at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            changes: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Set a new capacity, dropping the oldest records if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.changes.len() > capacity {
            self.changes.pop_front();
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn record(&mut self, change: StateChange<S, E>) {
        if self.capacity == 0 {
            return;
        }
        if self.changes.len() == self.capacity {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    /// Recorded changes, oldest first.
    pub fn changes(&self) -> impl ExactSizeIterator<Item = &StateChange<S, E>> {
        self.changes.iter()
    }

    /// Number of records kept.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Drop all records, keeping the capacity.
    pub fn clear(&mut self) {
        self.changes.clear();
    }

    /// Leaves visited, in order.
    ///
    /// Starts with the `from` of the oldest record (when the machine was
    /// running), followed by the `to` of every record. Stops contribute no
    /// entry.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(from) = self.changes.front().and_then(|c| c.from.as_ref()) {
            path.push(from);
        }
        path.extend(self.changes.iter().filter_map(|c| c.to.as_ref()));
        path
    }

    /// Time between the oldest and the newest record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
