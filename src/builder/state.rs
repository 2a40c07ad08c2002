//! Builder for declaring states.

use crate::core::{Hook, StateId};

/// A state declaration: name, optional parent and lifecycle hooks.
///
/// A state without a parent, or whose parent is itself, is a root candidate.
/// The first root candidate declared becomes the root of the machine.
#[derive(Clone, Debug)]
pub struct StateBuilder<S> {
    pub(crate) name: S,
    pub(crate) parent: Option<S>,
    pub(crate) on_enter: Hook,
    pub(crate) on_update: Hook,
    pub(crate) on_exit: Hook,
}

impl<S: StateId> StateBuilder<S> {
    /// Create a new state declaration with no parent and no hooks.
    pub fn new(name: S) -> Self {
        Self {
            name,
            parent: None,
            on_enter: Hook::noop(),
            on_update: Hook::noop(),
            on_exit: Hook::noop(),
        }
    }

    /// Set the parent state.
    pub fn parent(mut self, parent: S) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the hook run when the state is entered.
    pub fn on_enter<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_enter = Hook::new(action);
        self
    }

    /// Set the hook run on each tick the state is visited.
    pub fn on_update<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_update = Hook::new(action);
        self
    }

    /// Set the hook run when the state is exited.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_exit = Hook::new(action);
        self
    }

    /// Get the declared state.
    pub fn name(&self) -> &S {
        &self.name
    }

    /// Whether this declaration competes for the machine root.
    pub fn is_root_candidate(&self) -> bool {
        self.parent.as_ref().is_none_or(|parent| *parent == self.name)
    }
}
