#![allow(missing_docs)]
#![allow(dead_code)]

use echo_pds_reach::{DynamicPopHandler, StackAction};

/// A handler that resolves no dynamic pops at all.
pub struct NoopHandler;

impl DynamicPopHandler<u32, u32, u32, u32> for NoopHandler {
    fn perform_targeted_dynamic_pop(&self, _element: &u32, _action: &u32) -> Vec<Vec<StackAction<u32, u32>>> {
        Vec::new()
    }

    fn perform_untargeted_dynamic_pop(&self, _element: &u32, _action: &u32) -> Vec<(Vec<StackAction<u32, u32>>, u32)> {
        Vec::new()
    }
}

/// A handler backed by two plain closures, for scenarios that need a
/// specific dynamic-pop resolution without hand-writing a new type.
pub struct FnHandler<TF, UF> {
    pub targeted: TF,
    pub untargeted: UF,
}

impl<TF, UF> DynamicPopHandler<u32, u32, u32, u32> for FnHandler<TF, UF>
where
    TF: Fn(&u32, &u32) -> Vec<Vec<StackAction<u32, u32>>>,
    UF: Fn(&u32, &u32) -> Vec<(Vec<StackAction<u32, u32>>, u32)>,
{
    fn perform_targeted_dynamic_pop(&self, element: &u32, action: &u32) -> Vec<Vec<StackAction<u32, u32>>> {
        (self.targeted)(element, action)
    }

    fn perform_untargeted_dynamic_pop(&self, element: &u32, action: &u32) -> Vec<(Vec<StackAction<u32, u32>>, u32)> {
        (self.untargeted)(element, action)
    }
}

pub fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}
