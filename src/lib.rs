//! HFSM: a hierarchical finite state machine engine
//!
//! States are declared as a tree with enter, update and exit hooks, and
//! connected by transitions that fire on an event, a guard, both, or
//! unconditionally. The engine is then driven one tick at a time.
//!
//! # Core Concepts
//!
//! - **States**: named nodes of a tree; the engine always rests in a leaf
//! - **Transitions**: ordered edges; ancestors take priority over descendants
//! - **Events**: queued values, at most one consumed per `update`
//! - **Builder**: two-phase declaration resolved by name at `build`
//!
//! # Example
//!
//! ```rust
//! use hfsm::builder::{HfsmBuilder, StateBuilder};
//! use hfsm::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Player {
//!         Root,
//!         Grounded,
//!         Idle,
//!         Walking,
//!         Airborne,
//!     }
//! }
//!
//! event_enum! {
//!     enum Input {
//!         Jump,
//!         Land,
//!         Move,
//!     }
//! }
//!
//! # fn main() -> Result<(), hfsm::builder::BuildError> {
//! let mut machine = HfsmBuilder::<Player, Input>::new()
//!     .add_state(Player::Root)?
//!     .add_state_with_parent(Player::Grounded, Player::Root)?
//!     .add_state_with_parent(Player::Idle, Player::Grounded)?
//!     .add_state_with_parent(Player::Walking, Player::Grounded)?
//!     .state(StateBuilder::new(Player::Airborne).parent(Player::Root))?
//!     .add_transition_on(Player::Grounded, Player::Airborne, Input::Jump)
//!     .add_transition_on(Player::Airborne, Player::Grounded, Input::Land)
//!     .add_transition_on(Player::Idle, Player::Walking, Input::Move)
//!     .build()?;
//!
//! machine.start();
//! assert_eq!(machine.current_state_path(), "Root/Grounded/Idle");
//!
//! machine.send_event(Input::Move);
//! machine.update();
//! assert_eq!(machine.current_state(), Some(&Player::Walking));
//!
//! machine.send_event(Input::Jump);
//! machine.update();
//! assert_eq!(machine.active_hierarchy(), vec![Player::Root, Player::Airborne]);
//!
//! machine.stop();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, BuildWarning, HfsmBuilder, StateBuilder, TransitionBuilder};
pub use crate::core::{ChangeKind, Event, Guard, StateChange, StateHistory, StateId, StateTree};
pub use crate::engine::{EngineConfig, EventSender, Hfsm};
