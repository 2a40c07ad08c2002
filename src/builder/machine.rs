//! Builder for constructing hierarchical state machines.

use crate::builder::error::{BuildError, BuildWarning};
use crate::builder::state::StateBuilder;
use crate::builder::transition::{TransitionBuilder, TransitionDecl};
use crate::builder::{event_transition, guarded_transition, simple_transition};
use crate::core::tree::{NodeIndex, StateNode, Transition};
use crate::core::{Event, Guard, StateId, StateTree};
use crate::engine::{EngineConfig, Hfsm};
use std::collections::HashMap;
use std::sync::Arc;

/// Collects state and transition declarations, then resolves them into a
/// machine.
///
/// States are looked up by name only when [`build`](Self::build) runs, so
/// transitions may be declared before their endpoints. Transitions leaving
/// the same state keep their declaration order, which is their priority.
///
/// # Example
///
/// ```
/// use hfsm::builder::HfsmBuilder;
/// use hfsm::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door {
///         Root,
///         Closed,
///         Opened,
///     }
/// }
///
/// event_enum! {
///     enum Action {
///         Push,
///     }
/// }
///
/// # fn main() -> Result<(), hfsm::builder::BuildError> {
/// let mut machine = HfsmBuilder::<Door, Action>::new()
///     .add_state(Door::Root)?
///     .add_state_with_parent(Door::Closed, Door::Root)?
///     .add_state_with_parent(Door::Opened, Door::Root)?
///     .add_transition_on(Door::Closed, Door::Opened, Action::Push)
///     .build()?;
///
/// machine.start();
/// machine.send_event(Action::Push);
/// machine.update();
/// assert_eq!(machine.current_state_path(), "Root/Opened");
/// # Ok(())
/// # }
/// ```
pub struct HfsmBuilder<S: StateId, E: Event> {
    states: Vec<StateBuilder<S>>,
    names: HashMap<S, usize>,
    transitions: Vec<TransitionDecl<S, E>>,
    config: EngineConfig,
}

impl<S: StateId, E: Event> HfsmBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            names: HashMap::new(),
            transitions: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Declare a state.
    /// Returns an error if a state with the same name was already declared.
    pub fn state(mut self, state: StateBuilder<S>) -> Result<Self, BuildError> {
        if self.names.contains_key(&state.name) {
            return Err(BuildError::DuplicateState {
                state: state.name.name().to_string(),
            });
        }

        self.names.insert(state.name.clone(), self.states.len());
        self.states.push(state);
        Ok(self)
    }

    /// Declare a state without a parent and without hooks.
    pub fn add_state(self, name: S) -> Result<Self, BuildError> {
        self.state(StateBuilder::new(name))
    }

    /// Declare a child state without hooks.
    pub fn add_state_with_parent(self, name: S, parent: S) -> Result<Self, BuildError> {
        self.state(StateBuilder::new(name).parent(parent))
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add multiple transition declarations at once.
    pub fn transitions(mut self, transitions: Vec<TransitionDecl<S, E>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Unconditional transition, fires on any tick without an event.
    pub fn add_transition(mut self, from: S, to: S) -> Self {
        self.transitions.push(simple_transition(from, to));
        self
    }

    /// Transition fired by `event`.
    pub fn add_transition_on(mut self, from: S, to: S, event: E) -> Self {
        self.transitions.push(event_transition(from, to, event));
        self
    }

    /// Transition fired on ticks without an event while `guard` holds.
    pub fn add_transition_when<F>(mut self, from: S, to: S, guard: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.transitions.push(guarded_transition(from, to, guard));
        self
    }

    /// Transition fired by `event` while `guard` holds.
    pub fn add_transition_on_when<F>(mut self, from: S, to: S, event: E, guard: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.transitions.push(TransitionDecl {
            from,
            to,
            event: Some(event),
            guard: Some(Guard::new(guard)),
        });
        self
    }

    /// Set the engine configuration used by [`build`](Self::build).
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable state-change debug records on the built engine.
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.config.debug_logging = enabled;
        self
    }

    /// Build the machine.
    /// Returns an error if no root state exists or the hierarchy is invalid.
    pub fn build(self) -> Result<Hfsm<S, E>, BuildError> {
        let config = self.config.clone();
        let tree = self.build_tree()?;
        Ok(Hfsm::with_config(Arc::new(tree), config))
    }

    /// Resolve declarations into an immutable tree that engines can share.
    pub fn build_tree(self) -> Result<StateTree<S, E>, BuildError> {
        let root = self
            .states
            .iter()
            .position(StateBuilder::is_root_candidate)
            .map(NodeIndex)
            .ok_or(BuildError::NoRootState)?;

        let mut parents = Vec::with_capacity(self.states.len());
        for state in &self.states {
            let parent = match &state.parent {
                Some(parent) if !state.is_root_candidate() => {
                    let index = self.names.get(parent).copied().ok_or_else(|| {
                        BuildError::UnknownParent {
                            state: state.name.name().to_string(),
                            parent: parent.name().to_string(),
                        }
                    })?;
                    Some(NodeIndex(index))
                }
                _ => None,
            };
            parents.push(parent);
        }

        if let Some(index) = find_parent_cycle(&parents) {
            return Err(BuildError::ParentCycle {
                state: self.states[index].name.name().to_string(),
            });
        }

        let mut nodes: Vec<StateNode<S, E>> = self
            .states
            .into_iter()
            .zip(&parents)
            .map(|(state, &parent)| StateNode {
                name: state.name,
                parent,
                children: Vec::new(),
                transitions: Vec::new(),
                on_enter: state.on_enter,
                on_update: state.on_update,
                on_exit: state.on_exit,
            })
            .collect();

        for (child, parent) in parents.iter().enumerate() {
            if let Some(parent) = parent {
                nodes[parent.0].children.push(NodeIndex(child));
            }
        }

        let mut warnings = Vec::new();
        for decl in self.transitions {
            let from = self.names.get(&decl.from).copied();
            let to = self.names.get(&decl.to).copied();

            match (from, to) {
                (Some(from), Some(to)) => nodes[from]
                    .transitions
                    .push(Transition::new(NodeIndex(to), decl.event, decl.guard)),
                _ => {
                    let missing = if from.is_none() { &decl.from } else { &decl.to };
                    let warning = BuildWarning::DanglingTransition {
                        from: decl.from.name().to_string(),
                        to: decl.to.name().to_string(),
                        missing: missing.name().to_string(),
                    };
                    tracing::warn!(
                        from = decl.from.name(),
                        to = decl.to.name(),
                        missing = missing.name(),
                        "{}",
                        warning
                    );
                    warnings.push(warning);
                }
            }
        }

        Ok(StateTree::new(nodes, root, warnings))
    }
}

impl<S: StateId, E: Event> Default for HfsmBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of a state whose parent links loop without reaching a top-level
/// state, if any.
fn find_parent_cycle(parents: &[Option<NodeIndex>]) -> Option<usize> {
    (0..parents.len()).find(|&start| {
        let mut cursor = parents[start];
        let mut steps = 0;
        while let Some(NodeIndex(current)) = cursor {
            steps += 1;
            if steps > parents.len() {
                return true;
            }
            cursor = parents[current];
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_enum, state_enum};

    state_enum! {
        enum TestState {
            Root,
            A,
            B,
            C,
            Detached,
        }
    }

    event_enum! {
        enum TestEvent {
            Trigger,
        }
    }

    type Builder = HfsmBuilder<TestState, TestEvent>;

    // Root -> {A, B}, A -> {C}
    fn sample() -> Builder {
        Builder::new()
            .add_state(TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::A, TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::C, TestState::A)
            .unwrap()
            .add_state_with_parent(TestState::B, TestState::Root)
            .unwrap()
    }

    #[test]
    fn builder_requires_root_state() {
        let result = Builder::new().build();

        assert!(matches!(result, Err(BuildError::NoRootState)));
    }

    #[test]
    fn builder_rejects_duplicate_states() {
        let result = Builder::new()
            .add_state(TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::Root, TestState::A);

        assert!(matches!(
            result,
            Err(BuildError::DuplicateState { state }) if state == "Root"
        ));
    }

    #[test]
    fn builder_rejects_unknown_parent() {
        let result = Builder::new()
            .add_state(TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::A, TestState::B)
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(BuildError::UnknownParent { state, parent }) if state == "A" && parent == "B"
        ));
    }

    #[test]
    fn builder_rejects_parent_cycles() {
        let result = Builder::new()
            .add_state(TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::A, TestState::B)
            .unwrap()
            .add_state_with_parent(TestState::B, TestState::A)
            .unwrap()
            .build_tree();

        assert!(matches!(
            result,
            Err(BuildError::ParentCycle { state }) if state == "A"
        ));
    }

    #[test]
    fn children_follow_declaration_order() {
        let tree = sample().build_tree().unwrap();

        assert_eq!(tree.root(), &TestState::Root);
        assert_eq!(tree.children(&TestState::Root), vec![&TestState::A, &TestState::B]);
        assert_eq!(tree.children(&TestState::A), vec![&TestState::C]);
        assert_eq!(tree.parent(&TestState::B), Some(&TestState::Root));
    }

    #[test]
    fn first_root_candidate_wins() {
        let tree = Builder::new()
            .add_state_with_parent(TestState::A, TestState::Root)
            .unwrap()
            .add_state(TestState::Root)
            .unwrap()
            .add_state(TestState::Detached)
            .unwrap()
            .build_tree()
            .unwrap();

        assert_eq!(tree.root(), &TestState::Root);
        assert_eq!(tree.parent(&TestState::Detached), None);
        assert!(tree.children(&TestState::Root).contains(&&TestState::A));
    }

    #[test]
    fn self_parented_state_is_a_root() {
        let tree = Builder::new()
            .add_state_with_parent(TestState::Root, TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::A, TestState::Root)
            .unwrap()
            .build_tree()
            .unwrap();

        assert_eq!(tree.root(), &TestState::Root);
        assert_eq!(tree.parent(&TestState::Root), None);
    }

    #[test]
    fn dangling_transitions_are_dropped_with_warning() {
        let tree = sample()
            .add_transition(TestState::B, TestState::Detached)
            .add_transition(TestState::Detached, TestState::A)
            .add_transition_on(TestState::B, TestState::A, TestEvent::Trigger)
            .build_tree()
            .unwrap();

        assert_eq!(tree.transition_count(&TestState::B), 1);
        assert_eq!(
            tree.warnings(),
            &[
                BuildWarning::DanglingTransition {
                    from: "B".to_string(),
                    to: "Detached".to_string(),
                    missing: "Detached".to_string(),
                },
                BuildWarning::DanglingTransition {
                    from: "Detached".to_string(),
                    to: "A".to_string(),
                    missing: "Detached".to_string(),
                },
            ]
        );
    }

    #[test]
    fn transitions_may_precede_their_states() {
        let tree = Builder::new()
            .add_transition(TestState::B, TestState::A)
            .add_state(TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::A, TestState::Root)
            .unwrap()
            .add_state_with_parent(TestState::B, TestState::Root)
            .unwrap()
            .build_tree()
            .unwrap();

        assert_eq!(tree.transition_count(&TestState::B), 1);
        assert!(tree.warnings().is_empty());
    }

    #[test]
    fn transition_builder_is_validated() {
        let result = sample().transition(TransitionBuilder::new().from(TestState::A));

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn all_transition_forms_are_kept() {
        let tree = sample()
            .add_transition(TestState::A, TestState::B)
            .add_transition_on(TestState::A, TestState::B, TestEvent::Trigger)
            .add_transition_when(TestState::A, TestState::B, || false)
            .add_transition_on_when(TestState::A, TestState::B, TestEvent::Trigger, || true)
            .transition(
                TransitionBuilder::new()
                    .from(TestState::A)
                    .to(TestState::C)
                    .on(TestEvent::Trigger),
            )
            .unwrap()
            .transitions(vec![simple_transition(TestState::C, TestState::B)])
            .build_tree()
            .unwrap();

        assert_eq!(tree.transition_count(&TestState::A), 5);
        assert_eq!(tree.transition_count(&TestState::C), 1);
    }

    #[test]
    fn config_is_passed_to_engine() {
        let machine = sample().debug_logging(true).build().unwrap();

        assert!(machine.debug_logging());
        assert!(!machine.is_running());
    }
}
