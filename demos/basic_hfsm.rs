//! Basic Hierarchical State Machine
//!
//! This example builds the smallest interesting hierarchy and ticks it.
//!
//! Key concepts:
//! - Nested states, with the first child entered by default
//! - Event, guard and unconditional transitions
//! - Transitions declared before their source state
//!
//! Run with: cargo run --example basic_hfsm

use hfsm::builder::{BuildError, HfsmBuilder, StateBuilder};
use hfsm::{event_enum, state_enum};

state_enum! {
    enum States {
        Root,
        A,
        B,
        C,
    }
}

event_enum! {
    enum Events {
        Invalid,
        Trigger,
    }
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Basic Hierarchical State Machine ===\n");

    let mut machine = HfsmBuilder::<States, Events>::new()
        .add_state(States::Root)?
        .state(
            StateBuilder::new(States::A)
                .parent(States::Root)
                .on_enter(|| println!("  OnEnter a")),
        )?
        .state(
            StateBuilder::new(States::C)
                .parent(States::A)
                .on_enter(|| println!("  OnEnter c")),
        )?
        .add_transition_on(States::B, States::A, Events::Trigger)
        .add_transition_when(States::A, States::B, || false)
        .state(
            StateBuilder::new(States::B)
                .parent(States::Root)
                .on_enter(|| println!("  OnEnter b")),
        )?
        .add_transition(States::B, States::A)
        .debug_logging(true)
        .build()?;

    println!("Starting:");
    machine.start();
    println!("Active: {}\n", machine.current_state_path());

    println!("Update without events (a -> b is guarded by false):");
    machine.update();
    println!("Active: {}\n", machine.current_state_path());

    println!("Update with an unrelated event:");
    machine.send_event(Events::Invalid);
    machine.update();
    println!("Active: {}\n", machine.current_state_path());

    machine.stop();
    println!("Stopped: {:?}", machine.active_hierarchy());

    println!("\n=== Example Complete ===");
    Ok(())
}
