//! Identifier traits for states and events.
//!
//! States and events are named by values from a small, finite domain,
//! usually a fieldless enum. The engine never inspects them beyond equality,
//! hashing and the display name.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a state in the hierarchy.
///
/// Names must be unique within one machine. `name()` is used for
/// `current_state_path()` and for log records.
///
/// # Example
///
/// ```rust
/// use hfsm::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Closed,
///     Opened,
/// }
///
/// impl StateId for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Opened => "Opened",
///         }
///     }
/// }
///
/// assert_eq!(Door::Opened.name(), "Opened");
/// ```
pub trait StateId:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Display name of the state.
    fn name(&self) -> &str;
}

/// Events that can trigger transitions.
///
/// Blanket-implemented for every type with the required bounds, so a plain
/// `#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]` enum is enough.
pub trait Event:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}

impl<T> Event for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}
