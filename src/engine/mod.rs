//! Runtime engine for hierarchical state machines.
//!
//! This module is the imperative side of the crate: it keeps the active
//! leaf, consumes queued events and runs the user hooks.
//!
//! # Key Concepts
//!
//! - **Active hierarchy**: the chain from the top state down to the active leaf
//! - **Winning transition**: first match in root-to-leaf, then declaration order
//! - **Divergence point**: where the old and new hierarchies stop sharing states;
//!   only states below it are exited and entered

mod config;
mod machine;
mod queue;

pub use config::EngineConfig;
pub use machine::Hfsm;
pub use queue::EventSender;
