//! Indexed storage of nodes, edges, and untargeted-dynamic-pop actions.
//!
//! # Invariants
//!
//! - The graph never stores duplicate edges nor duplicate untargeted-dyn-pop
//!   associations (`add_edge`/`add_untargeted_dynamic_pop_action` are
//!   idempotent).
//! - `known_states` contains exactly the states `s` such that `State(s)` has
//!   been marked [`NodeStatus::Expanded`].
//! - Every direction the saturation engine consults (`find_push_edges_by_target`,
//!   `find_nop_edges_by_source`, `find_pop_edges_by_source`,
//!   `find_targeted_dynamic_pop_edges_by_source`) is backed by its own index,
//!   so no lookup degrades to a linear scan of the full edge set.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::action::StackAction;
use crate::edge::Edge;
use crate::node::Node;

/// Whether a node has been fully expanded or is only queued for expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// In the work collection awaiting expansion; not yet in the edge indices.
    Seen,
    /// Presented to every registered edge-/untargeted-dyn-pop-generating
    /// function exactly once.
    Expanded,
}

/// Indexed edge/node/untargeted-dyn-pop storage for one analysis.
#[derive(Debug)]
pub struct Graph<S, E, A, U> {
    edges: HashSet<Edge<S, E, A>>,
    push_edges_by_target: HashMap<Node<S, E, A>, Vec<(Node<S, E, A>, E)>>,
    nop_edges_by_source: HashMap<Node<S, E, A>, Vec<Node<S, E, A>>>,
    pop_edges_by_source: HashMap<Node<S, E, A>, Vec<(Node<S, E, A>, E)>>,
    dyn_targeted_pop_edges_by_source: HashMap<Node<S, E, A>, Vec<(Node<S, E, A>, A)>>,
    untargeted_dyn_pops: HashMap<Node<S, E, A>, HashSet<U>>,
    node_status: HashMap<Node<S, E, A>, NodeStatus>,
    known_states: HashSet<S>,
}

impl<S, E, A, U> Default for Graph<S, E, A, U> {
    fn default() -> Self {
        Self {
            edges: HashSet::new(),
            push_edges_by_target: HashMap::new(),
            nop_edges_by_source: HashMap::new(),
            pop_edges_by_source: HashMap::new(),
            dyn_targeted_pop_edges_by_source: HashMap::new(),
            untargeted_dyn_pops: HashMap::new(),
            node_status: HashMap::new(),
            known_states: HashSet::new(),
        }
    }
}

impl<S, E, A, U> Graph<S, E, A, U>
where
    S: Clone + Eq + Hash,
    E: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    U: Clone + Eq + Hash,
{
    /// Inserts `edge` into every relevant index. Idempotent.
    pub fn add_edge(&mut self, edge: Edge<S, E, A>) {
        if self.edges.contains(&edge) {
            return;
        }
        match &edge.action {
            StackAction::Nop => {
                self.nop_edges_by_source
                    .entry(edge.source.clone())
                    .or_default()
                    .push(edge.target.clone());
            }
            StackAction::Push(e) => {
                self.push_edges_by_target
                    .entry(edge.target.clone())
                    .or_default()
                    .push((edge.source.clone(), e.clone()));
            }
            StackAction::Pop(e) => {
                self.pop_edges_by_source
                    .entry(edge.source.clone())
                    .or_default()
                    .push((edge.target.clone(), e.clone()));
            }
            StackAction::DynTargetedPop(a) => {
                self.dyn_targeted_pop_edges_by_source
                    .entry(edge.source.clone())
                    .or_default()
                    .push((edge.target.clone(), a.clone()));
            }
        }
        self.edges.insert(edge);
    }

    /// Returns `true` if `edge` is already stored.
    pub fn has_edge(&self, edge: &Edge<S, E, A>) -> bool {
        self.edges.contains(edge)
    }

    /// Records an untargeted-dyn-pop association at `node`. Idempotent.
    pub fn add_untargeted_dynamic_pop_action(&mut self, node: Node<S, E, A>, action: U) {
        self.untargeted_dyn_pops.entry(node).or_default().insert(action);
    }

    /// Returns `true` if `(node, action)` was already recorded.
    pub fn has_untargeted_dynamic_pop_action(&self, node: &Node<S, E, A>, action: &U) -> bool {
        self.untargeted_dyn_pops
            .get(node)
            .is_some_and(|set| set.contains(action))
    }

    /// All incoming `Push` edges ending at `n`: `(source, element)` pairs.
    pub fn find_push_edges_by_target(&self, n: &Node<S, E, A>) -> impl Iterator<Item = &(Node<S, E, A>, E)> {
        self.push_edges_by_target.get(n).into_iter().flatten()
    }

    /// All `Nop` edges starting at `n`: destination nodes.
    pub fn find_nop_edges_by_source(&self, n: &Node<S, E, A>) -> impl Iterator<Item = &Node<S, E, A>> {
        self.nop_edges_by_source.get(n).into_iter().flatten()
    }

    /// All `Pop` edges starting at `n`: `(target, element)` pairs.
    pub fn find_pop_edges_by_source(&self, n: &Node<S, E, A>) -> impl Iterator<Item = &(Node<S, E, A>, E)> {
        self.pop_edges_by_source.get(n).into_iter().flatten()
    }

    /// All `DynTargetedPop` edges starting at `n`: `(target, action)` pairs.
    pub fn find_targeted_dynamic_pop_edges_by_source(
        &self,
        n: &Node<S, E, A>,
    ) -> impl Iterator<Item = &(Node<S, E, A>, A)> {
        self.dyn_targeted_pop_edges_by_source.get(n).into_iter().flatten()
    }

    /// All untargeted-dyn-pop actions recorded at `n`.
    pub fn untargeted_dynamic_pop_actions_at(&self, n: &Node<S, E, A>) -> impl Iterator<Item = &U> {
        self.untargeted_dyn_pops.get(n).into_iter().flatten()
    }

    /// All nodes that have been referenced (either `Seen` or `Expanded`).
    pub fn enumerate_nodes(&self) -> impl Iterator<Item = &Node<S, E, A>> {
        self.node_status.keys()
    }

    /// All stored edges.
    pub fn enumerate_edges(&self) -> impl Iterator<Item = &Edge<S, E, A>> {
        self.edges.iter()
    }

    /// Current status of `n`, if it has been referenced at all.
    pub fn status(&self, n: &Node<S, E, A>) -> Option<NodeStatus> {
        self.node_status.get(n).copied()
    }

    /// Marks `n` as `Seen` if it has no status yet. Returns `true` if this
    /// call actually changed the status (i.e. `n` was unknown before).
    pub fn mark_seen_if_new(&mut self, n: &Node<S, E, A>) -> bool {
        if self.node_status.contains_key(n) {
            return false;
        }
        self.node_status.insert(n.clone(), NodeStatus::Seen);
        true
    }

    /// Marks `n` as `Expanded`, recording its state in `known_states` if it
    /// is a `State` node.
    pub fn mark_expanded(&mut self, n: &Node<S, E, A>) {
        self.node_status.insert(n.clone(), NodeStatus::Expanded);
        if let Node::State(s) = n {
            self.known_states.insert(s.clone());
        }
    }

    /// `true` if `n` is already `Expanded`.
    pub fn is_expanded(&self, n: &Node<S, E, A>) -> bool {
        matches!(self.status(n), Some(NodeStatus::Expanded))
    }

    /// The states `s` such that `State(s)` has been expanded.
    pub fn known_states(&self) -> impl Iterator<Item = &S> {
        self.known_states.iter()
    }

    /// Number of distinct nodes referenced so far.
    pub fn node_count(&self) -> usize {
        self.node_status.len()
    }

    /// Number of edges stored.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
