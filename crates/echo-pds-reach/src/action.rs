//! Stack-action vocabulary and the dynamic-pop handler contract.

/// A single stack action attached to one edge.
///
/// Multi-action edges never occur in the graph itself — an `add_edge` call
/// that supplies more than one action is decomposed (see
/// [`crate::node::Node::Intermediate`]) into a chain of single-action edges
/// before it ever reaches the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StackAction<E, A> {
    /// Traversable without any stack change.
    Nop,
    /// Pushes `e` onto the stack.
    Push(E),
    /// Pops iff the top of the stack equals `e`.
    Pop(E),
    /// Pops whatever is on top; the outcome depends on the concrete element,
    /// resolved at closure time by [`DynamicPopHandler::perform_targeted_dynamic_pop`].
    DynTargetedPop(A),
}

/// User-supplied, pure, total resolution of dynamic pop actions.
///
/// Both methods must be deterministic: repeated calls with the same
/// arguments must yield the same (or a superset of the same) results. The
/// engine may call either method multiple times over the lifetime of an
/// analysis and assumes results depend only on the arguments given.
pub trait DynamicPopHandler<S, E, A, U> {
    /// Given the stack-top element and a targeted-dyn-pop action token,
    /// returns the zero-or-more ways that pop succeeds. Each alternative is
    /// a (possibly empty) list of stack actions to continue with.
    fn perform_targeted_dynamic_pop(&self, element: &E, action: &A) -> Vec<Vec<StackAction<E, A>>>;

    /// Given the stack-top element and an untargeted-dyn-pop action token,
    /// returns the zero-or-more ways that pop succeeds, each alternative
    /// also naming the destination state (unlike the targeted form, the
    /// destination is not fixed at edge-creation time).
    fn perform_untargeted_dynamic_pop(&self, element: &E, action: &U) -> Vec<(Vec<StackAction<E, A>>, S)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── 1. StackAction is structurally comparable ───────────────────────

    #[test]
    fn stack_action_equality_is_structural() {
        let a: StackAction<u32, u32> = StackAction::Push(3);
        let b: StackAction<u32, u32> = StackAction::Push(3);
        let c: StackAction<u32, u32> = StackAction::Push(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    // ── 2. Nop/Push/Pop/DynTargetedPop are distinct variants ────────────

    #[test]
    fn variants_are_distinguishable() {
        let nop: StackAction<u32, u32> = StackAction::Nop;
        let push: StackAction<u32, u32> = StackAction::Push(1);
        let pop: StackAction<u32, u32> = StackAction::Pop(1);
        let dyn_pop: StackAction<u32, u32> = StackAction::DynTargetedPop(1);
        assert_ne!(nop, push);
        assert_ne!(push, pop);
        assert_ne!(pop, dyn_pop);
    }
}
