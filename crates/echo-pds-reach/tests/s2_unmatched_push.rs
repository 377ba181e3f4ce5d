#![allow(missing_docs)]
mod common;

use common::NoopHandler;
use echo_pds_reach::{Analysis, StackAction};

#[test]
fn unmatched_push_leaves_only_the_start_state_reachable() {
    let mut a: Analysis<u32, u32, u32, u32, NoopHandler> = Analysis::new(NoopHandler);
    a.add_edge(1, vec![StackAction::Push(9)], 2);
    a.add_start_state(1, vec![]);
    a.fully_close().unwrap();

    let reachable: Vec<u32> = a.get_reachable_states(&1, &[]).unwrap().collect();
    assert_eq!(reachable, vec![1]);
}
