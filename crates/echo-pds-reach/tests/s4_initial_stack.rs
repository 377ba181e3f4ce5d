#![allow(missing_docs)]
mod common;

use common::NoopHandler;
use echo_pds_reach::{Analysis, StackAction};

#[test]
fn a_nonempty_initial_stack_supplies_the_matching_context() {
    let mut a: Analysis<u32, u32, u32, u32, NoopHandler> = Analysis::new(NoopHandler);
    a.add_edge(1, vec![StackAction::Pop(9)], 2);
    // The start word [Push 9] stands in for "the stack already holds a 9";
    // the real Pop(9) rule above has nothing to match against until this
    // virtual push supplies it.
    a.add_start_state(1, vec![StackAction::Push(9)]);
    a.fully_close().unwrap();

    let reachable: Vec<u32> = a
        .get_reachable_states(&1, &[StackAction::Push(9)])
        .unwrap()
        .collect();
    // Only 2 discharges the stack; state 1 is not trivially included here
    // because the initial stack is nonempty — unlike the empty-word case,
    // reaching empty stack requires an actual pop.
    assert_eq!(reachable, vec![2]);
}
