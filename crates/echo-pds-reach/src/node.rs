// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph vertex representation.

use crate::action::StackAction;

/// A vertex of the saturation graph.
///
/// `Intermediate` nodes are structurally interned by construction: equality
/// and hashing are derived over `(target, actions)`, so two independent
/// registrations of the same tail action list produce the same node value
/// and therefore collapse to one key in any `HashMap`/`HashSet` keyed by
/// `Node`. No arena or hash-cons table is needed — `#[derive]` already gives
/// value-based structural sharing, the same way `rmg-core::ident::NodeId`'s
/// derived `Eq`/`Hash` makes two hashes of the same label compare equal
/// without an interning step.
///
/// Only `State` and `Intermediate` are engine-visible; any `Initial`-style
/// node that a pretty-printer might want is purely a rendering concern and
/// does not exist at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node<S, E, A> {
    /// A node identifying a PDS state.
    State(S),
    /// An anonymous node standing for "execute the nonempty action sequence
    /// `actions`, then continue from `target`".
    Intermediate {
        /// The node to continue from once `actions` is exhausted.
        target: Box<Node<S, E, A>>,
        /// The (always nonempty, by construction) remaining action chain.
        actions: Vec<StackAction<E, A>>,
    },
}

impl<S, E, A> Node<S, E, A> {
    /// Builds the anchor node for a start state: `Intermediate(State(s), actions)`
    /// when `actions` is nonempty, or simply `State(s)` when it is empty.
    ///
    /// This mirrors the decomposition rule in §4.E.1: an empty action list
    /// never needs an intermediate wrapper because there is nothing left to
    /// owe before reaching `s`.
    pub fn anchor(state: S, actions: Vec<StackAction<E, A>>) -> Self {
        if actions.is_empty() {
            Node::State(state)
        } else {
            Node::Intermediate {
                target: Box::new(Node::State(state)),
                actions,
            }
        }
    }

    /// Returns the inner state if this node is a `State` node.
    pub fn as_state(&self) -> Option<&S> {
        match self {
            Node::State(s) => Some(s),
            Node::Intermediate { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── 1. structural equality of Intermediate nodes ────────────────────

    #[test]
    fn intermediate_nodes_with_same_structure_are_equal() {
        let a: Node<u32, u32, u32> = Node::Intermediate {
            target: Box::new(Node::State(7)),
            actions: vec![StackAction::Push(1), StackAction::Pop(2)],
        };
        let b: Node<u32, u32, u32> = Node::Intermediate {
            target: Box::new(Node::State(7)),
            actions: vec![StackAction::Push(1), StackAction::Pop(2)],
        };
        assert_eq!(a, b);

        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    // ── 2. different tails are different nodes ──────────────────────────

    #[test]
    fn intermediate_nodes_with_different_tails_are_distinct() {
        let a: Node<u32, u32, u32> = Node::Intermediate {
            target: Box::new(Node::State(7)),
            actions: vec![StackAction::Push(1)],
        };
        let b: Node<u32, u32, u32> = Node::Intermediate {
            target: Box::new(Node::State(7)),
            actions: vec![StackAction::Push(2)],
        };
        assert_ne!(a, b);
    }

    // ── 3. anchor collapses empty action lists to a bare State node ─────

    #[test]
    fn anchor_with_empty_actions_is_bare_state() {
        let node: Node<u32, u32, u32> = Node::anchor(5, vec![]);
        assert_eq!(node, Node::State(5));
    }

    // ── 4. anchor wraps nonempty action lists in Intermediate ───────────

    #[test]
    fn anchor_with_actions_wraps_in_intermediate() {
        let node: Node<u32, u32, u32> = Node::anchor(5, vec![StackAction::Push(9)]);
        assert_eq!(
            node,
            Node::Intermediate {
                target: Box::new(Node::State(5)),
                actions: vec![StackAction::Push(9)],
            }
        );
    }
}
