//! Registered edge-generating and untargeted-dyn-pop-generating functions.
//!
//! Both kinds are append-only and must be pure: on repeated calls with the
//! same input they must yield the same (or a superset of the same) results.
//! The engine calls each at most once per state (the "catch-up pass" on
//! registration, plus once on each subsequent `ExpandNode(State(_))`).

use crate::action::StackAction;

/// `state -> lazy sequence of (action_list, state)`.
pub trait EdgeFn<S, E, A> {
    /// Produces the edges that should exist out of `state`.
    fn call(&self, state: &S) -> Vec<(Vec<StackAction<E, A>>, S)>;
}

impl<S, E, A, F> EdgeFn<S, E, A> for F
where
    F: Fn(&S) -> Vec<(Vec<StackAction<E, A>>, S)>,
{
    fn call(&self, state: &S) -> Vec<(Vec<StackAction<E, A>>, S)> {
        self(state)
    }
}

/// `state -> lazy sequence of untargeted_dyn_pop_action`.
pub trait UntargetedDynPopFn<S, U> {
    /// Produces the untargeted-dyn-pop action tokens that apply at `state`.
    fn call(&self, state: &S) -> Vec<U>;
}

impl<S, U, F> UntargetedDynPopFn<S, U> for F
where
    F: Fn(&S) -> Vec<U>,
{
    fn call(&self, state: &S) -> Vec<U> {
        self(state)
    }
}
