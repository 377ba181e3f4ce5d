// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type for the reachability engine.

/// Errors raised synchronously at the query or closure site.
///
/// Every other condition described in the engine's contract (empty results,
/// a not-yet-closed analysis) is represented by an empty or incomplete
/// result sequence rather than by failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReachabilityError<S: std::fmt::Debug> {
    /// `get_reachable_states` was called for a `(state, actions)` pair that
    /// was never registered via [`crate::Analysis::add_start_state`].
    #[error("reachability requested for non-start state: {0:?}")]
    ReachabilityRequestForNonStartState(S),

    /// `fully_close` exceeded the configured closure-step budget.
    ///
    /// This is a defensive guard, not a termination guarantee: the engine's
    /// contract never promises saturation terminates, and a handler that
    /// keeps producing genuinely new edges will still hit this rather than
    /// loop forever.
    #[error("closure did not finish within {steps} steps")]
    StepBudgetExceeded {
        /// The configured budget that was exhausted.
        steps: u64,
    },
}
