//! Guard predicates and lifecycle hooks.
//!
//! Both are zero-argument closures owned by the state tree. Guards decide
//! whether a transition may fire; hooks are run by the engine when a state is
//! entered, updated or exited.

use std::fmt;
use std::sync::Arc;

/// Predicate that must hold for a transition to fire.
///
/// Guards should be free of side effects. The engine evaluates them on every
/// tick the owning state is visited, so they may run many times.
///
/// # Example
///
/// ```rust
/// use hfsm::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let door_open = Arc::new(AtomicBool::new(false));
/// let flag = door_open.clone();
/// let guard = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!guard.check());
/// door_open.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Side-effecting callback run on a lifecycle event of a state.
///
/// The default hook does nothing.
#[derive(Clone, Default)]
pub struct Hook {
    action: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Hook {
    /// Create a hook from an action.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Hook {
            action: Some(Arc::new(action)),
        }
    }

    /// Hook that does nothing.
    pub fn noop() -> Self {
        Self::default()
    }

    /// Whether this hook has no action.
    pub fn is_noop(&self) -> bool {
        self.action.is_none()
    }

    /// Run the action, if any.
    pub fn run(&self) {
        if let Some(action) = &self.action {
            action();
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("Hook(noop)")
        } else {
            f.write_str("Hook(..)")
        }
    }
}
