//! Core state machine types.
//!
//! This module contains the passive data of a hierarchical machine:
//! - State and event identifiers via the `StateId` and `Event` traits
//! - Guard predicates and lifecycle hooks
//! - The immutable arena tree of states and transitions
//! - Bounded state-change history
//!
//! Nothing here drives callbacks; that is the engine's job.

mod guard;
mod history;
mod state;
pub(crate) mod tree;

pub use guard::{Guard, Hook};
pub use history::{ChangeKind, StateChange, StateHistory};
pub use state::{Event, StateId};
pub use tree::StateTree;
