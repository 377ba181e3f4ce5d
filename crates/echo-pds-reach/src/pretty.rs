//! Non-normative DOT and plain-text rendering of an in-progress analysis.
//!
//! Nothing here is part of the engine's contract: no snapshot format is
//! defined, and this module never influences closure behavior. Only
//! `State` and `Intermediate` nodes are ever rendered — there is no third,
//! "initial", node kind at this layer.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::action::{DynamicPopHandler, StackAction};
use crate::engine::Analysis;
use crate::node::Node;
use crate::work::WorkQueue;

fn format_action<E: Display, A: Display>(action: &StackAction<E, A>) -> String {
    match action {
        StackAction::Nop => "nop".to_string(),
        StackAction::Push(e) => format!("push {e}"),
        StackAction::Pop(e) => format!("pop {e}"),
        StackAction::DynTargetedPop(a) => format!("dyn-pop {a}"),
    }
}

fn format_node<S: Display, E: Display, A: Display>(node: &Node<S, E, A>) -> String {
    match node {
        Node::State(s) => format!("state({s})"),
        Node::Intermediate { target, actions } => {
            let chain = actions.iter().map(format_action).collect::<Vec<_>>().join(", ");
            format!("[{chain}] -> {}", format_node(target))
        }
    }
}

/// Renders an analysis as Graphviz DOT or as a plain-text node/edge dump.
pub trait ToDot {
    /// A Graphviz `digraph` with one labeled node per graph node and one
    /// labeled edge per stored edge.
    fn to_dot(&self) -> String;

    /// A plain-text dump: one line per node, one line per edge.
    fn to_text(&self) -> String;
}

impl<S, E, A, U, H, Q> ToDot for Analysis<S, E, A, U, H, Q>
where
    S: Clone + Eq + Hash + Debug + Display,
    E: Clone + Eq + Hash + Debug + Display,
    A: Clone + Eq + Hash + Debug + Display,
    U: Clone + Eq + Hash,
    H: DynamicPopHandler<S, E, A, U>,
    Q: WorkQueue<S, E, A, U>,
{
    fn to_dot(&self) -> String {
        use fmt::Write as _;
        let mut out = String::from("digraph pds_reachability {\n");
        for node in self.graph().enumerate_nodes() {
            let label = format_node(node);
            let _ = writeln!(out, "  \"{label}\";");
        }
        for edge in self.graph().enumerate_edges() {
            let source = format_node(&edge.source);
            let target = format_node(&edge.target);
            let action = format_action(&edge.action);
            let _ = writeln!(out, "  \"{source}\" -> \"{target}\" [label=\"{action}\"];");
        }
        out.push('}');
        out
    }

    fn to_text(&self) -> String {
        use fmt::Write as _;
        let mut out = String::new();
        for node in self.graph().enumerate_nodes() {
            let _ = writeln!(out, "node: {}", format_node(node));
        }
        for edge in self.graph().enumerate_edges() {
            let _ = writeln!(
                out,
                "edge: {} --{}--> {}",
                format_node(&edge.source),
                format_action(&edge.action),
                format_node(&edge.target)
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AnalysisConfig;

    struct NoopHandler;

    impl DynamicPopHandler<u32, u32, u32, u32> for NoopHandler {
        fn perform_targeted_dynamic_pop(&self, _element: &u32, _action: &u32) -> Vec<Vec<StackAction<u32, u32>>> {
            Vec::new()
        }

        fn perform_untargeted_dynamic_pop(&self, _element: &u32, _action: &u32) -> Vec<(Vec<StackAction<u32, u32>>, u32)> {
            Vec::new()
        }
    }

    // ── 1. to_dot renders a valid-looking digraph wrapper ───────────────

    #[test]
    fn to_dot_wraps_in_digraph_block() {
        let mut a: Analysis<u32, u32, u32, u32, NoopHandler> =
            Analysis::with_config(NoopHandler, AnalysisConfig::default());
        a.add_edge(1, vec![StackAction::Push(9)], 2);
        a.add_start_state(1, vec![]);
        a.fully_close().unwrap();

        let dot = a.to_dot();
        assert!(dot.starts_with("digraph pds_reachability {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("push 9"));
    }

    // ── 2. to_text lists at least one node and one edge line ────────────

    #[test]
    fn to_text_lists_nodes_and_edges() {
        let mut a: Analysis<u32, u32, u32, u32, NoopHandler> =
            Analysis::with_config(NoopHandler, AnalysisConfig::default());
        a.add_edge(1, vec![StackAction::Push(9)], 2);
        a.add_start_state(1, vec![]);
        a.fully_close().unwrap();

        let text = a.to_text();
        assert!(text.lines().any(|l| l.starts_with("node:")));
        assert!(text.lines().any(|l| l.starts_with("edge:")));
    }
}
