//! The saturation engine: registration operations and the closure step.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::action::{DynamicPopHandler, StackAction};
use crate::edge::Edge;
use crate::error::ReachabilityError;
use crate::functions::{EdgeFn, UntargetedDynPopFn};
use crate::graph::Graph;
use crate::node::Node;
use crate::work::{FifoWorkQueue, WorkItem, WorkQueue};

/// Tunable limits on closure behavior.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Caps the number of `closure_step` calls `fully_close` will perform
    /// before giving up. `None` (the default) means unbounded — termination
    /// is then entirely the registered handler's responsibility, as nothing
    /// in this engine's contract promises saturation terminates.
    pub max_closure_steps: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_closure_steps: None,
        }
    }
}

/// Running counters, populated only when the `telemetry` feature is enabled.
#[cfg(feature = "telemetry")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Telemetry {
    /// Number of `ExpandNode` items processed.
    pub expansions: u64,
    /// Number of edges actually inserted (after idempotence checks).
    pub edges_introduced: u64,
    /// Number of untargeted-dyn-pop associations actually inserted.
    pub dyn_pops_introduced: u64,
}

/// Decomposes `actions` into the single edge that should be enqueued next,
/// wrapping the remainder in an `Intermediate` node when more than one
/// action remains.
fn chain_edge<S, E, A>(from: Node<S, E, A>, mut actions: Vec<StackAction<E, A>>, target: Node<S, E, A>) -> Edge<S, E, A> {
    if actions.is_empty() {
        Edge::new(from, target, StackAction::Nop)
    } else if actions.len() == 1 {
        let action = actions.remove(0);
        Edge::new(from, target, action)
    } else {
        let head = actions.remove(0);
        let intermediate = Node::Intermediate {
            target: Box::new(target),
            actions,
        };
        Edge::new(from, intermediate, head)
    }
}

/// A pushdown-system reachability analysis in progress.
///
/// `S` is the PDS state type, `E` the stack-element type, `A` the
/// targeted-dyn-pop action token, `U` the untargeted-dyn-pop action token,
/// `H` the registered [`DynamicPopHandler`], and `Q` the work-collection
/// policy (defaults to [`FifoWorkQueue`]).
pub struct Analysis<S, E, A, U, H, Q = FifoWorkQueue<S, E, A, U>> {
    handler: H,
    config: AnalysisConfig,
    graph: Graph<S, E, A, U>,
    work: Q,
    edge_fns: Vec<Box<dyn EdgeFn<S, E, A>>>,
    dyn_pop_fns: Vec<Box<dyn UntargetedDynPopFn<S, U>>>,
    start_anchors: HashSet<Node<S, E, A>>,
    #[cfg(feature = "telemetry")]
    telemetry: Telemetry,
}

impl<S, E, A, U, H, Q> Analysis<S, E, A, U, H, Q>
where
    S: Clone + Eq + Hash + Debug,
    E: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    U: Clone + Eq + Hash,
    H: DynamicPopHandler<S, E, A, U>,
    Q: WorkQueue<S, E, A, U>,
{
    /// Builds a new analysis with the default (unbounded) configuration.
    pub fn new(handler: H) -> Self
    where
        Q: Default,
    {
        Self::with_config(handler, AnalysisConfig::default())
    }

    /// Builds a new analysis with an explicit configuration.
    pub fn with_config(handler: H, config: AnalysisConfig) -> Self
    where
        Q: Default,
    {
        Self {
            handler,
            config,
            graph: Graph::default(),
            work: Q::default(),
            edge_fns: Vec::new(),
            dyn_pop_fns: Vec::new(),
            start_anchors: HashSet::new(),
            #[cfg(feature = "telemetry")]
            telemetry: Telemetry::default(),
        }
    }

    /// Registers a fixed edge `s1 --actions--> s2`, decomposing multi-action
    /// lists into a chain of single-action edges via intermediate nodes.
    pub fn add_edge(&mut self, s1: S, actions: Vec<StackAction<E, A>>, s2: S) {
        let edge = chain_edge(Node::State(s1), actions, Node::State(s2));
        self.enqueue_introduce_edge(edge);
    }

    /// Registers an edge-generating function. Runs it once over every state
    /// already known to the graph (the "catch-up pass") before appending it
    /// to the list consulted on every future `ExpandNode(State(_))`.
    pub fn add_edge_function<F>(&mut self, f: F)
    where
        F: EdgeFn<S, E, A> + 'static,
    {
        let known: Vec<S> = self.graph.known_states().cloned().collect();
        for s in &known {
            for (actions, to) in f.call(s) {
                let edge = chain_edge(Node::State(s.clone()), actions, Node::State(to));
                self.enqueue_introduce_edge(edge);
            }
        }
        self.edge_fns.push(Box::new(f));
    }

    /// Registers a single untargeted-dyn-pop association at `s`.
    pub fn add_untargeted_dynamic_pop_action(&mut self, s: S, action: U) {
        self.enqueue_introduce_untargeted_dyn_pop(Node::State(s), action);
    }

    /// Registers an untargeted-dyn-pop-generating function, running the same
    /// catch-up pass as [`Self::add_edge_function`].
    pub fn add_untargeted_dynamic_pop_action_function<G>(&mut self, g: G)
    where
        G: UntargetedDynPopFn<S, U> + 'static,
    {
        let known: Vec<S> = self.graph.known_states().cloned().collect();
        for s in &known {
            for action in g.call(s) {
                self.enqueue_introduce_untargeted_dyn_pop(Node::State(s.clone()), action);
            }
        }
        self.dyn_pop_fns.push(Box::new(g));
    }

    /// Registers `(s, actions)` as a query anchor and enqueues its expansion.
    ///
    /// The anchor is exactly [`Node::anchor`]`(s, actions)` — a bare `State`
    /// node when `actions` is empty, an `Intermediate` node otherwise. This
    /// is also the node [`Self::get_reachable_states`] reconstructs to
    /// locate a previously-registered start state.
    pub fn add_start_state(&mut self, s: S, actions: Vec<StackAction<E, A>>) {
        let anchor = Node::anchor(s, actions);
        self.start_anchors.insert(anchor.clone());
        self.enqueue_expand_if_new(&anchor);
    }

    /// `true` once the work collection is empty.
    pub fn is_closed(&self) -> bool {
        self.work.is_empty()
    }

    /// Processes exactly one pending work item, if any is pending.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn closure_step(&mut self) {
        let Some(item) = self.work.take() else {
            return;
        };
        match item {
            WorkItem::ExpandNode(node) => self.handle_expand_node(node),
            WorkItem::IntroduceEdge(edge) => self.handle_introduce_edge(edge),
            WorkItem::IntroduceUntargetedDynPop(node, action) => {
                self.handle_introduce_untargeted_dyn_pop(node, action)
            }
        }
    }

    /// Runs `closure_step` until the work collection is empty, or until the
    /// configured step budget (if any) is exhausted.
    pub fn fully_close(&mut self) -> Result<(), ReachabilityError<S>> {
        let mut steps: u64 = 0;
        while !self.is_closed() {
            if let Some(max) = self.config.max_closure_steps {
                if steps >= max {
                    return Err(ReachabilityError::StepBudgetExceeded { steps: max });
                }
            }
            self.closure_step();
            steps += 1;
        }
        Ok(())
    }

    /// Returns the states reachable from `(s, actions)` by fully discharging
    /// the stack, or an error if `(s, actions)` was never registered via
    /// [`Self::add_start_state`].
    ///
    /// `closure_step`'s `Nop` row only ever composes a newly-introduced `Nop`
    /// edge against *incoming* `Push` edges — it never fuses two `Nop` edges
    /// together — so a multi-hop `Nop` chain from the anchor is never
    /// collapsed into one edge during closure. This query performs that
    /// traversal itself: the reflexive-transitive closure of `Nop` edges
    /// starting at the anchor, restricted to `State` targets (the anchor
    /// counts as its own zero-step answer exactly when it already is a
    /// `State` node, i.e. when `actions` was empty).
    pub fn get_reachable_states(
        &self,
        s: &S,
        actions: &[StackAction<E, A>],
    ) -> Result<impl Iterator<Item = S>, ReachabilityError<S>> {
        let anchor = Node::anchor(s.clone(), actions.to_vec());
        if !self.start_anchors.contains(&anchor) {
            return Err(ReachabilityError::ReachabilityRequestForNonStartState(s.clone()));
        }

        let mut visited: HashSet<Node<S, E, A>> = HashSet::new();
        let mut pending = vec![anchor];
        let mut states = Vec::new();
        while let Some(n) = pending.pop() {
            if !visited.insert(n.clone()) {
                continue;
            }
            if let Node::State(st) = &n {
                states.push(st.clone());
            }
            for next in self.graph.find_nop_edges_by_source(&n) {
                if !visited.contains(next) {
                    pending.push(next.clone());
                }
            }
        }
        Ok(states.into_iter())
    }

    /// `(node_count, edge_count)` for the current graph.
    pub fn get_size(&self) -> (usize, usize) {
        (self.graph.node_count(), self.graph.edge_count())
    }

    /// Read-only access to the underlying graph, for the pretty-printer.
    pub(crate) fn graph(&self) -> &Graph<S, E, A, U> {
        &self.graph
    }

    /// Telemetry counters. Only available behind the `telemetry` feature.
    #[cfg(feature = "telemetry")]
    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    fn enqueue_introduce_edge(&mut self, edge: Edge<S, E, A>) {
        if !self.graph.has_edge(&edge) {
            self.work.offer(WorkItem::IntroduceEdge(edge));
        }
    }

    fn enqueue_introduce_untargeted_dyn_pop(&mut self, node: Node<S, E, A>, action: U) {
        if !self.graph.has_untargeted_dynamic_pop_action(&node, &action) {
            self.work.offer(WorkItem::IntroduceUntargetedDynPop(node, action));
        }
    }

    /// Enqueues `ExpandNode(node)` the first time `node` is ever seen.
    /// Idempotent: a node already `Seen` or `Expanded` is never re-enqueued.
    fn enqueue_expand_if_new(&mut self, node: &Node<S, E, A>) {
        if self.graph.is_expanded(node) {
            return;
        }
        if self.graph.mark_seen_if_new(node) {
            self.work.offer(WorkItem::ExpandNode(node.clone()));
        }
    }

    fn handle_expand_node(&mut self, node: Node<S, E, A>) {
        tracing::debug!(?node, "expanding node");
        self.graph.mark_expanded(&node);
        #[cfg(feature = "telemetry")]
        {
            self.telemetry.expansions += 1;
        }

        match &node {
            Node::State(s) => {
                let mut produced_edges = Vec::new();
                for f in &self.edge_fns {
                    for (actions, to) in f.call(s) {
                        produced_edges.push(chain_edge(node.clone(), actions, Node::State(to)));
                    }
                }
                let mut produced_dyn_pops = Vec::new();
                for g in &self.dyn_pop_fns {
                    for action in g.call(s) {
                        produced_dyn_pops.push(action);
                    }
                }
                for edge in produced_edges {
                    self.enqueue_introduce_edge(edge);
                }
                for action in produced_dyn_pops {
                    self.enqueue_introduce_untargeted_dyn_pop(node.clone(), action);
                }
            }
            Node::Intermediate { target, actions } => {
                let edge = chain_edge(node.clone(), actions.clone(), (**target).clone());
                self.enqueue_introduce_edge(edge);
            }
        }
    }

    fn handle_introduce_edge(&mut self, edge: Edge<S, E, A>) {
        if self.graph.has_edge(&edge) {
            return;
        }

        let mut consequences: Vec<Edge<S, E, A>> = Vec::new();

        match edge.action.clone() {
            StackAction::Nop => {
                let matches: Vec<(Node<S, E, A>, E)> =
                    self.graph.find_push_edges_by_target(&edge.source).cloned().collect();
                for (p, k) in matches {
                    consequences.push(Edge::new(p, edge.target.clone(), StackAction::Push(k)));
                }
            }
            StackAction::Push(k) => {
                let nop_targets: Vec<Node<S, E, A>> =
                    self.graph.find_nop_edges_by_source(&edge.target).cloned().collect();
                for t in nop_targets {
                    consequences.push(Edge::new(edge.source.clone(), t, StackAction::Push(k.clone())));
                }

                let pop_targets: Vec<(Node<S, E, A>, E)> =
                    self.graph.find_pop_edges_by_source(&edge.target).cloned().collect();
                for (t, popped) in pop_targets {
                    if popped == k {
                        consequences.push(Edge::new(edge.source.clone(), t, StackAction::Nop));
                    }
                }

                let dyn_targets: Vec<(Node<S, E, A>, A)> = self
                    .graph
                    .find_targeted_dynamic_pop_edges_by_source(&edge.target)
                    .cloned()
                    .collect();
                for (t, action) in dyn_targets {
                    for action_list in self.handler.perform_targeted_dynamic_pop(&k, &action) {
                        consequences.push(chain_edge(edge.source.clone(), action_list, t.clone()));
                    }
                }

                let untargeted: Vec<U> = self
                    .graph
                    .untargeted_dynamic_pop_actions_at(&edge.target)
                    .cloned()
                    .collect();
                for action in untargeted {
                    for (action_list, s) in self.handler.perform_untargeted_dynamic_pop(&k, &action) {
                        consequences.push(chain_edge(edge.source.clone(), action_list, Node::State(s)));
                    }
                }
            }
            StackAction::Pop(k) => {
                let matches: Vec<(Node<S, E, A>, E)> =
                    self.graph.find_push_edges_by_target(&edge.source).cloned().collect();
                for (p, pushed) in matches {
                    if pushed == k {
                        consequences.push(Edge::new(p, edge.target.clone(), StackAction::Nop));
                    }
                }
            }
            StackAction::DynTargetedPop(action) => {
                let matches: Vec<(Node<S, E, A>, E)> =
                    self.graph.find_push_edges_by_target(&edge.source).cloned().collect();
                for (p, k) in matches {
                    for action_list in self.handler.perform_targeted_dynamic_pop(&k, &action) {
                        consequences.push(chain_edge(p.clone(), action_list, edge.target.clone()));
                    }
                }
            }
        }

        for consequent in consequences {
            let target = consequent.target.clone();
            self.enqueue_introduce_edge(consequent);
            self.enqueue_expand_if_new(&target);
        }

        // The edge's own target must be expanded too, not only consequent
        // targets — otherwise a state reachable solely as a push-edge target
        // never runs the registered edge-/dyn-pop-generating functions.
        self.enqueue_expand_if_new(&edge.target);

        tracing::debug!(?edge, "introducing edge");
        #[cfg(feature = "telemetry")]
        {
            self.telemetry.edges_introduced += 1;
        }
        self.graph.add_edge(edge);
    }

    fn handle_introduce_untargeted_dyn_pop(&mut self, node: Node<S, E, A>, action: U) {
        if self.graph.has_untargeted_dynamic_pop_action(&node, &action) {
            return;
        }

        let matches: Vec<(Node<S, E, A>, E)> = self.graph.find_push_edges_by_target(&node).cloned().collect();
        for (p, k) in matches {
            for (action_list, s) in self.handler.perform_untargeted_dynamic_pop(&k, &action) {
                let target = Node::State(s);
                let edge = chain_edge(p.clone(), action_list, target.clone());
                self.enqueue_introduce_edge(edge);
                self.enqueue_expand_if_new(&target);
            }
        }

        #[cfg(feature = "telemetry")]
        {
            self.telemetry.dyn_pops_introduced += 1;
        }
        self.graph.add_untargeted_dynamic_pop_action(node, action);
    }
}
