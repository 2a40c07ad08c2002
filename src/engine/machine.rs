//! Runtime engine driving a state tree tick by tick.

use crate::core::tree::{NodeIndex, Transition};
use crate::core::{ChangeKind, Event, StateChange, StateHistory, StateId, StateTree};
use crate::engine::config::EngineConfig;
use crate::engine::queue::EventSender;
use chrono::Utc;
use std::sync::Arc;

/// Why the active leaf is moving.
enum Cause<'a, E> {
    Start,
    Stop,
    Transition {
        source: NodeIndex,
        transition: &'a Transition<E>,
        event: Option<&'a E>,
    },
}

/// A running hierarchical state machine.
///
/// The engine owns the active leaf and the pending-event queue; the state
/// tree itself is immutable and may be shared with other engines through
/// [`tree`](Self::tree) and [`Hfsm::new`].
///
/// All operations run to completion on the calling thread. Hooks and guards
/// run inside [`update`](Self::update), [`start`](Self::start) and
/// [`stop`](Self::stop). A hook may queue events through an
/// [`EventSender`], but must not drive the machine itself: nested updates are
/// not supported. The `&mut self` receiver keeps a hook from borrowing its
/// engine directly, but a hook that captured the engine behind a lock would
/// deadlock on it.
///
/// Dropping a running machine does not run exit hooks. Call
/// [`stop`](Self::stop) for an orderly teardown.
#[derive(Debug)]
pub struct Hfsm<S: StateId, E: Event> {
    tree: Arc<StateTree<S, E>>,
    current: Option<NodeIndex>,
    events: EventSender<E>,
    config: EngineConfig,
    history: StateHistory<S, E>,
}

impl<S: StateId, E: Event> Hfsm<S, E> {
    /// Create a stopped engine over a shared tree with the default config.
    pub fn new(tree: Arc<StateTree<S, E>>) -> Self {
        Self::with_config(tree, EngineConfig::default())
    }

    /// Create a stopped engine over a shared tree.
    pub fn with_config(tree: Arc<StateTree<S, E>>, config: EngineConfig) -> Self {
        let history = StateHistory::new(config.history_capacity);
        Self {
            tree,
            current: None,
            events: EventSender::new(),
            config,
            history,
        }
    }

    /// Activate the root's default leaf.
    ///
    /// On a running machine this returns to the default leaf, exiting and
    /// entering only the states that differ.
    pub fn start(&mut self) {
        let root = self.tree.root_index();
        tracing::trace!(root = self.tree.root().name(), "Starting machine");
        self.change_active_state(Some(root), Cause::Start);
    }

    /// Exit the whole active hierarchy, deepest state first.
    ///
    /// Does nothing on a stopped machine. Pending events are kept.
    pub fn stop(&mut self) {
        if self.current.is_none() {
            return;
        }
        tracing::trace!("Stopping machine");
        self.change_active_state(None, Cause::Stop);
    }

    /// Run one tick.
    ///
    /// A stopped machine is started instead, without consuming an event or
    /// running update hooks. Otherwise at most one event is dequeued and the
    /// active hierarchy is walked from the root down: the first state owning
    /// a matching transition fires it and ends the walk, and every state
    /// visited before it runs its update hook.
    ///
    /// Must not be called from a hook of this machine. Hooks that need to
    /// steer it should queue an event through [`event_sender`](Self::event_sender).
    pub fn update(&mut self) {
        let Some(leaf) = self.current else {
            tracing::trace!("Update on stopped machine, starting");
            self.start();
            return;
        };

        let event = self.events.pop();
        tracing::trace!(event = ?event, "Update tick");

        let tree = Arc::clone(&self.tree);
        for index in tree.chain(leaf) {
            let node = tree.node(index);
            if let Some(transition) = node.winning_transition(event.as_ref()) {
                self.change_active_state(
                    Some(transition.target()),
                    Cause::Transition {
                        source: index,
                        transition,
                        event: event.as_ref(),
                    },
                );
                return;
            }
            node.on_update.run();
        }
    }

    /// Queue an event for a later [`update`](Self::update).
    pub fn send_event(&self, event: E) {
        self.events.send(event);
    }

    /// Handle for queueing events from hooks or other owners.
    pub fn event_sender(&self) -> EventSender<E> {
        self.events.clone()
    }

    /// Number of queued events not yet consumed.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Active states from the top of the hierarchy down to the current leaf.
    ///
    /// Empty when the machine is stopped.
    pub fn active_hierarchy(&self) -> Vec<S> {
        self.active_chain()
            .into_iter()
            .map(|index| self.tree.node(index).name.clone())
            .collect()
    }

    /// Names of the active hierarchy joined with the configured separator.
    pub fn current_state_path(&self) -> String {
        self.active_chain()
            .into_iter()
            .map(|index| self.tree.node(index).name.name())
            .collect::<Vec<_>>()
            .join(&self.config.path_separator)
    }

    /// The root state of the tree.
    pub fn root(&self) -> &S {
        self.tree.root()
    }

    /// The active leaf, if running.
    pub fn current_state(&self) -> Option<&S> {
        self.current.map(|index| &self.tree.node(index).name)
    }

    /// Whether the machine has been started and not stopped.
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Whether `state` is part of the active hierarchy.
    pub fn is_active(&self, state: &S) -> bool {
        self.tree
            .index_of(state)
            .is_some_and(|index| self.active_chain().contains(&index))
    }

    /// The shared state tree.
    pub fn tree(&self) -> &Arc<StateTree<S, E>> {
        &self.tree
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Enable or disable the per-change debug record.
    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.config.debug_logging = enabled;
    }

    /// Whether debug logging is enabled.
    pub fn debug_logging(&self) -> bool {
        self.config.debug_logging
    }

    /// Resize the state-change history. Zero disables recording.
    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.config.history_capacity = capacity;
        self.history.set_capacity(capacity);
    }

    /// Recorded state changes, if history is enabled.
    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    fn active_chain(&self) -> Vec<NodeIndex> {
        self.current
            .map(|leaf| self.tree.chain(leaf))
            .unwrap_or_default()
    }

    /// Move the active leaf to the default leaf of `target`, or stop.
    ///
    /// The old and new chains are split at their longest common prefix. The
    /// old suffix is exited deepest first, the leaf is switched, then the new
    /// suffix is entered shallowest first.
    fn change_active_state(&mut self, target: Option<NodeIndex>, cause: Cause<'_, E>) {
        let tree = Arc::clone(&self.tree);
        let next = target.map(|index| tree.first_leaf_index(index));

        let old_chain = self.active_chain();
        let new_chain = next.map(|leaf| tree.chain(leaf)).unwrap_or_default();
        let shared = common_prefix_len(&old_chain, &new_chain);

        for &index in old_chain[shared..].iter().rev() {
            tree.node(index).on_exit.run();
        }

        let previous = std::mem::replace(&mut self.current, next);
        self.report(previous, next, &cause);

        for &index in &new_chain[shared..] {
            tree.node(index).on_enter.run();
        }
    }

    fn report(&mut self, previous: Option<NodeIndex>, next: Option<NodeIndex>, cause: &Cause<'_, E>) {
        if !self.config.debug_logging && self.history.capacity() == 0 {
            return;
        }

        let name = |index: Option<NodeIndex>| index.map(|i| self.tree.node(i).name.clone());
        let from = name(previous);
        let to = name(next);
        let (source, event, guard_result) = match cause {
            Cause::Start | Cause::Stop => (None, None, None),
            Cause::Transition {
                source,
                transition,
                event,
            } => (
                name(Some(*source)),
                transition.event().and(*event).cloned(),
                transition.is_guarded().then_some(true),
            ),
        };

        let kind = match cause {
            Cause::Start => ChangeKind::Start,
            Cause::Stop => ChangeKind::Stop,
            Cause::Transition { .. } => ChangeKind::Transition,
        };

        if self.config.debug_logging {
            tracing::debug!(
                kind = kind.as_str(),
                from = from.as_ref().map(StateId::name),
                to = to.as_ref().map(StateId::name),
                source = source.as_ref().map(StateId::name),
                matched_event = ?event,
                guard_result = ?guard_result,
                "State changed"
            );
        }

        self.history.record(StateChange {
            kind,
            from,
            to,
            source,
            event,
            guard_result,
            timestamp: Utc::now(),
        });
    }
}

/// Length of the shared prefix of two root-to-leaf chains, i.e. the depth
/// just below their lowest common ancestor.
fn common_prefix_len(old: &[NodeIndex], new: &[NodeIndex]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}
