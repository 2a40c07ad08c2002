//! Game Character Controller
//!
//! This example drives a character whose hooks feed events back into the
//! machine, and prints the recorded history at the end.
//!
//! Key concepts:
//! - Hooks queue events through an `EventSender`
//! - Events queued during a tick are handled on the next tick
//! - Bounded state-change history with timestamps
//!
//! Run with: cargo run --example game_character

use hfsm::builder::{BuildError, HfsmBuilder, StateBuilder, TransitionBuilder};
use hfsm::{event_enum, state_enum, EngineConfig, EventSender, StateId};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

state_enum! {
    enum Character {
        Alive,
        Grounded,
        Idle,
        Running,
        Airborne,
        Dead,
    }
}

event_enum! {
    enum Input {
        Move,
        Stop,
        Jump,
        Land,
        Hit,
    }
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt::init();

    println!("=== Game Character Controller ===\n");

    let health = Arc::new(AtomicI32::new(2));
    let outbox: Arc<Mutex<Option<EventSender<Input>>>> = Arc::default();

    let airborne_outbox = outbox.clone();
    let hit_health = health.clone();
    let alive_health = health.clone();

    let mut machine = HfsmBuilder::<Character, Input>::new()
        .add_state(Character::Alive)?
        .add_state_with_parent(Character::Grounded, Character::Alive)?
        .add_state_with_parent(Character::Idle, Character::Grounded)?
        .add_state_with_parent(Character::Running, Character::Grounded)?
        .state(
            StateBuilder::new(Character::Airborne)
                .parent(Character::Alive)
                .on_update(move || {
                    // Gravity: land on the tick after the jump.
                    if let Some(sender) = airborne_outbox.lock().unwrap().as_ref() {
                        sender.send(Input::Land);
                    }
                }),
        )?
        .state(StateBuilder::new(Character::Dead).on_enter(|| println!("  Game over")))?
        .transition(
            TransitionBuilder::new()
                .from(Character::Alive)
                .to(Character::Dead)
                .on(Input::Hit)
                .when(move || hit_health.load(Ordering::SeqCst) <= 0),
        )?
        .add_transition_on_when(Character::Grounded, Character::Airborne, Input::Jump, move || {
            alive_health.load(Ordering::SeqCst) > 0
        })
        .add_transition_on(Character::Airborne, Character::Grounded, Input::Land)
        .add_transition_on(Character::Idle, Character::Running, Input::Move)
        .add_transition_on(Character::Running, Character::Idle, Input::Stop)
        .config(
            EngineConfig::default()
                .with_debug_logging(true)
                .with_history_capacity(32),
        )
        .build()?;

    *outbox.lock().unwrap() = Some(machine.event_sender());

    machine.start();
    let script = [
        Some(Input::Move),
        Some(Input::Jump),
        None,
        Some(Input::Stop),
        Some(Input::Hit),
        Some(Input::Hit),
        Some(Input::Hit),
    ];
    for input in script {
        if let Some(input) = input {
            if input == Input::Hit {
                health.fetch_sub(1, Ordering::SeqCst);
            }
            machine.send_event(input);
        }
        machine.update();
        println!("{:<12} -> {}", format!("{input:?}"), machine.current_state_path());
    }

    println!("\nHistory:");
    for change in machine.history().changes() {
        println!(
            "  {} -> {} (via {:?}, event {:?})",
            change.from.as_ref().map_or("-", StateId::name),
            change.to.as_ref().map_or("-", StateId::name),
            change.source.as_ref().map(StateId::name),
            change.event,
        );
    }

    machine.stop();
    println!("\n=== Example Complete ===");
    Ok(())
}
