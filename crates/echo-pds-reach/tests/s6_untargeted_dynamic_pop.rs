#![allow(missing_docs)]
mod common;

use common::FnHandler;
use echo_pds_reach::{Analysis, StackAction};

#[test]
fn untargeted_dynamic_pop_resolves_against_every_matching_push() {
    let handler = FnHandler {
        targeted: |_: &u32, _: &u32| Vec::new(),
        untargeted: |element: &u32, action: &u32| {
            if *element == 5 && *action == 99 {
                vec![(vec![], 4u32)]
            } else {
                vec![]
            }
        },
    };
    let mut a: Analysis<u32, u32, u32, u32, _> = Analysis::new(handler);
    a.add_edge(1, vec![StackAction::Push(5)], 2);
    a.add_untargeted_dynamic_pop_action(2, 99);
    a.add_start_state(1, vec![]);
    a.fully_close().unwrap();

    let reachable = common::sorted(a.get_reachable_states(&1, &[]).unwrap().collect());
    assert_eq!(reachable, vec![1, 4]);

    let (nodes, _) = a.get_size();
    assert!(nodes >= 3, "expected states 1, 2, and 4 to all be known");
}
