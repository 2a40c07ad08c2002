//! Arena representation of the state hierarchy.
//!
//! Every state lives in one `Vec` and refers to its parent, children and
//! transition targets by index. The tree is produced once by the builder and
//! never mutated afterwards, so it can be shared between engines behind an
//! `Arc`.

use super::guard::{Guard, Hook};
use super::state::{Event, StateId};
use crate::builder::BuildWarning;
use std::collections::HashMap;

/// Position of a node inside the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(pub(crate) usize);

/// Outgoing edge of a state.
#[derive(Clone, Debug)]
pub(crate) struct Transition<E> {
    target: NodeIndex,
    event: Option<E>,
    guard: Option<Guard>,
}

impl<E: Event> Transition<E> {
    pub(crate) fn new(target: NodeIndex, event: Option<E>, guard: Option<Guard>) -> Self {
        Self {
            target,
            event,
            guard,
        }
    }

    pub(crate) fn target(&self) -> NodeIndex {
        self.target
    }

    pub(crate) fn event(&self) -> Option<&E> {
        self.event.as_ref()
    }

    pub(crate) fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Match this transition against the event consumed on the current tick.
    ///
    /// The guard is evaluated first. A transition without a stored event only
    /// matches a tick with no event, so event-triggered transitions always
    /// win over guard-only ones while an event is in flight.
    pub(crate) fn matches(&self, received: Option<&E>) -> bool {
        if !self.guard.as_ref().is_none_or(|g| g.check()) {
            return false;
        }

        match (&self.event, received) {
            (None, None) => true,
            (Some(expected), Some(received)) => expected == received,
            (None, Some(_)) | (Some(_), None) => false,
        }
    }
}

/// One state of the hierarchy.
#[derive(Debug)]
pub(crate) struct StateNode<S, E> {
    pub(crate) name: S,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
    pub(crate) transitions: Vec<Transition<E>>,
    pub(crate) on_enter: Hook,
    pub(crate) on_update: Hook,
    pub(crate) on_exit: Hook,
}

impl<S: StateId, E: Event> StateNode<S, E> {
    /// First transition matching `received`, in declaration order.
    pub(crate) fn winning_transition(&self, received: Option<&E>) -> Option<&Transition<E>> {
        self.transitions.iter().find(|t| t.matches(received))
    }
}

/// Immutable state hierarchy produced by [`HfsmBuilder`](crate::builder::HfsmBuilder).
///
/// Queries take state names. Unknown names yield `None` or empty results.
#[derive(Debug)]
pub struct StateTree<S: StateId, E: Event> {
    nodes: Vec<StateNode<S, E>>,
    index: HashMap<S, NodeIndex>,
    root: NodeIndex,
    warnings: Vec<BuildWarning>,
}

impl<S: StateId, E: Event> StateTree<S, E> {
    pub(crate) fn new(
        nodes: Vec<StateNode<S, E>>,
        root: NodeIndex,
        warnings: Vec<BuildWarning>,
    ) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name.clone(), NodeIndex(i)))
            .collect();

        Self {
            nodes,
            index,
            root,
            warnings,
        }
    }

    pub(crate) fn node(&self, index: NodeIndex) -> &StateNode<S, E> {
        &self.nodes[index.0]
    }

    pub(crate) fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub(crate) fn index_of(&self, name: &S) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Follow first-declared children down to a leaf.
    pub(crate) fn first_leaf_index(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(&child) = self.node(index).children.first() {
            index = child;
        }
        index
    }

    /// Chain of nodes from the top of the tree down to `index`, inclusive.
    pub(crate) fn chain(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = Vec::new();
        let mut cursor = Some(index);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.node(current).parent;
        }
        chain.reverse();
        chain
    }

    /// Name of the machine's root state.
    pub fn root(&self) -> &S {
        &self.node(self.root).name
    }

    /// Number of declared states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built tree; a root is required.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &S) -> bool {
        self.index.contains_key(name)
    }

    /// All state names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &S> {
        self.nodes.iter().map(|node| &node.name)
    }

    pub fn parent(&self, name: &S) -> Option<&S> {
        let index = self.index_of(name)?;
        let parent = self.node(index).parent?;
        Some(&self.node(parent).name)
    }

    /// Children of `name` in declaration order.
    pub fn children(&self, name: &S) -> Vec<&S> {
        self.index_of(name)
            .map(|index| {
                self.node(index)
                    .children
                    .iter()
                    .map(|&child| &self.node(child).name)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_leaf(&self, name: &S) -> bool {
        self.index_of(name)
            .is_some_and(|index| self.node(index).children.is_empty())
    }

    /// Leaf reached by always taking the first declared child of `name`.
    pub fn first_leaf(&self, name: &S) -> Option<&S> {
        let index = self.index_of(name)?;
        Some(&self.node(self.first_leaf_index(index)).name)
    }

    /// Names from the topmost ancestor of `name` down to `name` itself.
    pub fn ancestry(&self, name: &S) -> Vec<&S> {
        self.index_of(name)
            .map(|index| {
                self.chain(index)
                    .into_iter()
                    .map(|i| &self.node(i).name)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of outgoing transitions kept for `name` after build.
    pub fn transition_count(&self, name: &S) -> usize {
        self.index_of(name)
            .map(|index| self.node(index).transitions.len())
            .unwrap_or(0)
    }

    /// Non-fatal problems found while building the tree.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum S {
        Root,
        A,
        B,
        C,
    }

    impl StateId for S {
        fn name(&self) -> &str {
            match self {
                Self::Root => "Root",
                Self::A => "A",
                Self::B => "B",
                Self::C => "C",
            }
        }
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Ev {
        Trigger,
        Other,
    }

    fn node(name: S, parent: Option<usize>, children: Vec<usize>) -> StateNode<S, Ev> {
        StateNode {
            name,
            parent: parent.map(NodeIndex),
            children: children.into_iter().map(NodeIndex).collect(),
            transitions: Vec::new(),
            on_enter: Hook::noop(),
            on_update: Hook::noop(),
            on_exit: Hook::noop(),
        }
    }

    // Root -> {A, B}, A -> {C}
    fn sample_tree() -> StateTree<S, Ev> {
        StateTree::new(
            vec![
                node(S::Root, None, vec![1, 2]),
                node(S::A, Some(0), vec![3]),
                node(S::B, Some(0), vec![]),
                node(S::C, Some(1), vec![]),
            ],
            NodeIndex(0),
            Vec::new(),
        )
    }

    #[test]
    fn unconditional_transition_matches_only_without_event() {
        let t: Transition<Ev> = Transition::new(NodeIndex(0), None, None);

        assert!(t.matches(None));
        assert!(!t.matches(Some(&Ev::Trigger)));
    }

    #[test]
    fn event_transition_requires_same_event() {
        let t = Transition::new(NodeIndex(0), Some(Ev::Trigger), None);

        assert!(t.matches(Some(&Ev::Trigger)));
        assert!(!t.matches(Some(&Ev::Other)));
        assert!(!t.matches(None));
    }

    #[test]
    fn guard_only_transition_never_fires_on_event_ticks() {
        let t: Transition<Ev> = Transition::new(NodeIndex(0), None, Some(Guard::new(|| true)));

        assert!(t.matches(None));
        assert!(!t.matches(Some(&Ev::Other)));
    }

    #[test]
    fn failing_guard_blocks_matching_event() {
        let t = Transition::new(
            NodeIndex(0),
            Some(Ev::Trigger),
            Some(Guard::new(|| false)),
        );

        assert!(!t.matches(Some(&Ev::Trigger)));
        assert!(t.is_guarded());
        assert_eq!(t.event(), Some(&Ev::Trigger));
    }

    #[test]
    fn winning_transition_respects_declaration_order() {
        let mut root = node(S::Root, None, vec![]);
        root.transitions
            .push(Transition::new(NodeIndex(1), None, Some(Guard::new(|| false))));
        root.transitions.push(Transition::new(NodeIndex(2), None, None));
        root.transitions.push(Transition::new(NodeIndex(3), None, None));

        let winner = root.winning_transition(None).map(|t| t.target());
        assert_eq!(winner, Some(NodeIndex(2)));
    }

    #[test]
    fn first_leaf_follows_first_children() {
        let tree = sample_tree();

        assert_eq!(tree.first_leaf(&S::Root), Some(&S::C));
        assert_eq!(tree.first_leaf(&S::B), Some(&S::B));
    }

    #[test]
    fn chain_is_ordered_root_to_node() {
        let tree = sample_tree();

        assert_eq!(tree.ancestry(&S::C), vec![&S::Root, &S::A, &S::C]);
        assert_eq!(
            tree.chain(NodeIndex(3)),
            vec![NodeIndex(0), NodeIndex(1), NodeIndex(3)]
        );
    }

    #[test]
    fn queries_by_name() {
        let tree = sample_tree();

        assert_eq!(tree.root(), &S::Root);
        assert_eq!(tree.len(), 4);
        assert!(!tree.is_empty());
        assert_eq!(tree.parent(&S::C), Some(&S::A));
        assert_eq!(tree.parent(&S::Root), None);
        assert_eq!(tree.children(&S::Root), vec![&S::A, &S::B]);
        assert!(tree.is_leaf(&S::B));
        assert!(!tree.is_leaf(&S::A));
        assert_eq!(
            tree.names().copied().collect::<Vec<_>>(),
            vec![S::Root, S::A, S::B, S::C]
        );
        assert!(tree.warnings().is_empty());
    }
}
