//! Builder API for declaring hierarchical state machines.
//!
//! Declarations are collected by name and resolved in one pass by
//! [`HfsmBuilder::build`]. This module also provides the identifier macros
//! and shorthand constructors for common transition shapes.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::{BuildError, BuildWarning};
pub use machine::HfsmBuilder;
pub use state::StateBuilder;
pub use transition::{TransitionBuilder, TransitionDecl};

use crate::core::{Event, Guard, StateId};

/// Create an unconditional transition declaration.
///
/// It fires on any tick where no event was consumed.
///
/// # Example
///
/// ```
/// use hfsm::builder::simple_transition;
/// use hfsm::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// let transition = simple_transition::<MyState, ()>(MyState::Start, MyState::End);
/// assert!(transition.event.is_none());
/// ```
pub fn simple_transition<S: StateId, E: Event>(from: S, to: S) -> TransitionDecl<S, E> {
    TransitionDecl {
        from,
        to,
        event: None,
        guard: None,
    }
}

/// Create a transition declaration triggered by an event.
pub fn event_transition<S: StateId, E: Event>(from: S, to: S, event: E) -> TransitionDecl<S, E> {
    TransitionDecl {
        from,
        to,
        event: Some(event),
        guard: None,
    }
}

/// Create a transition declaration with a guard predicate.
///
/// # Example
///
/// ```
/// use hfsm::builder::guarded_transition;
/// use hfsm::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         Middle,
///     }
/// }
///
/// let transition = guarded_transition::<MyState, (), _>(MyState::Start, MyState::Middle, || true);
/// assert!(transition.guard.is_some());
/// ```
pub fn guarded_transition<S, E, F>(from: S, to: S, guard: F) -> TransitionDecl<S, E>
where
    S: StateId,
    E: Event,
    F: Fn() -> bool + Send + Sync + 'static,
{
    TransitionDecl {
        from,
        to,
        event: None,
        guard: Some(Guard::new(guard)),
    }
}
