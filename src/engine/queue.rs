//! Pending-event queue shared between an engine and its senders.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle for queueing events on a machine.
///
/// Cloning the handle shares the queue, so a sender captured by a state hook
/// can feed events back into the machine that runs it. Events queued while an
/// update is in progress are consumed by a later update.
#[derive(Debug)]
pub struct EventSender<E> {
    queue: Arc<Mutex<VecDeque<E>>>,
}

impl<E> EventSender<E> {
    pub(crate) fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    // A panicking hook cannot leave the queue half-modified.
    fn lock(&self) -> MutexGuard<'_, VecDeque<E>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an event. Never blocks on the machine.
    pub fn send(&self, event: E) {
        self.lock().push_back(event);
    }

    pub(crate) fn pop(&self) -> Option<E> {
        self.lock().pop_front()
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every pending event.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}
