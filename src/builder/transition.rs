//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, StateId};

/// A transition declared by name, resolved against the states at build time.
#[derive(Clone, Debug)]
pub struct TransitionDecl<S, E> {
    pub from: S,
    pub to: S,
    pub event: Option<E>,
    pub guard: Option<Guard>,
}

/// Builder for transition declarations with a fluent API.
pub struct TransitionBuilder<S, E> {
    from: Option<S>,
    to: Option<S>,
    event: Option<E>,
    guard: Option<Guard>,
}

impl<S: StateId, E: Event> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            event: None,
            guard: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Set the triggering event (optional).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the declaration.
    pub fn build(self) -> Result<TransitionDecl<S, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionDecl {
            from,
            to,
            event: self.event,
            guard: self.guard,
        })
    }
}

impl<S: StateId, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum TestState {
            Idle,
            Running,
        }
    }

    type Builder = TransitionBuilder<TestState, String>;

    #[test]
    fn builder_validates_missing_from() {
        let result = Builder::new().to(TestState::Running).build();

        assert!(matches!(result, Err(BuildError::MissingFromState)));
    }

    #[test]
    fn builder_validates_missing_to() {
        let result = Builder::new().from(TestState::Idle).build();

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn fluent_api_builds_declaration() {
        let decl = Builder::new()
            .from(TestState::Idle)
            .to(TestState::Running)
            .on("go".to_string())
            .when(|| true)
            .build()
            .unwrap();

        assert_eq!(decl.from, TestState::Idle);
        assert_eq!(decl.to, TestState::Running);
        assert_eq!(decl.event.as_deref(), Some("go"));
        assert!(decl.guard.as_ref().is_some_and(Guard::check));
    }

    #[test]
    fn event_and_guard_are_optional() {
        let decl = Builder::new()
            .from(TestState::Running)
            .to(TestState::Idle)
            .build()
            .unwrap();

        assert!(decl.event.is_none());
        assert!(decl.guard.is_none());
    }
}
