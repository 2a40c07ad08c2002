//! Traffic Light State Machine
//!
//! This example nests the usual light cycle inside an "operational" state,
//! next to a flashing maintenance mode.
//!
//! Key concepts:
//! - Ancestor transitions pre-empt the cycle at any point
//! - Guards over shared counters drive the cycle
//! - Only the diverging part of the hierarchy is exited and entered
//!
//! Run with: cargo run --example traffic_light

use hfsm::builder::{BuildError, HfsmBuilder, StateBuilder};
use hfsm::{event_enum, state_enum, EngineConfig};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

state_enum! {
    enum Light {
        Controller,
        Operational,
        Red,
        Green,
        Yellow,
        Maintenance,
    }
}

event_enum! {
    enum Command {
        Fault,
        Repaired,
    }
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt::init();

    println!("=== Traffic Light State Machine ===\n");

    // Ticks spent in the current color, reset on every enter.
    let ticks = Arc::new(AtomicU32::new(0));
    let timer = |limit: u32| {
        let ticks = ticks.clone();
        move || ticks.load(Ordering::SeqCst) >= limit
    };
    let reset = || {
        let ticks = ticks.clone();
        move || ticks.store(0, Ordering::SeqCst)
    };
    let count = ticks.clone();

    let mut machine = HfsmBuilder::<Light, Command>::new()
        .add_state(Light::Controller)?
        .state(
            StateBuilder::new(Light::Operational)
                .parent(Light::Controller)
                .on_update(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
        )?
        .state(
            StateBuilder::new(Light::Red)
                .parent(Light::Operational)
                .on_enter(reset()),
        )?
        .state(
            StateBuilder::new(Light::Green)
                .parent(Light::Operational)
                .on_enter(reset()),
        )?
        .state(
            StateBuilder::new(Light::Yellow)
                .parent(Light::Operational)
                .on_enter(reset()),
        )?
        .state(
            StateBuilder::new(Light::Maintenance)
                .parent(Light::Controller)
                .on_enter(|| println!("  (flashing yellow)"))
                .on_exit(|| println!("  (flashing stopped)")),
        )?
        .add_transition_on(Light::Operational, Light::Maintenance, Command::Fault)
        .add_transition_on(Light::Maintenance, Light::Operational, Command::Repaired)
        .add_transition_when(Light::Red, Light::Green, timer(3))
        .add_transition_when(Light::Green, Light::Yellow, timer(3))
        .add_transition_when(Light::Yellow, Light::Red, timer(1))
        .config(EngineConfig::default().with_path_separator(" > "))
        .build()?;

    machine.start();
    for tick in 0..10 {
        if tick == 6 {
            machine.send_event(Command::Fault);
        }
        if tick == 8 {
            machine.send_event(Command::Repaired);
        }
        machine.update();
        println!("tick {tick:>2}: {}", machine.current_state_path());
    }

    machine.stop();
    println!("\n=== Example Complete ===");
    Ok(())
}
