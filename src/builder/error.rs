//! Build errors and warnings for machine, state and transition builders.

use thiserror::Error;

/// Errors that prevent a machine from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("State '{state}' is already defined")]
    DuplicateState { state: String },

    #[error("No root state defined. Declare at least one state without a parent")]
    NoRootState,

    #[error("State '{state}' declares unknown parent '{parent}'")]
    UnknownParent { state: String, parent: String },

    #[error("State '{state}' is part of a parent cycle")]
    ParentCycle { state: String },

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,
}

/// Problems found during build that do not prevent the machine from running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildWarning {
    /// A transition referenced a state that was never declared; it was dropped.
    #[error("Transition '{from}' -> '{to}' dropped: unknown state '{missing}'")]
    DanglingTransition {
        from: String,
        to: String,
        missing: String,
    },
}
