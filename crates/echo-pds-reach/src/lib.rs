//! Pushdown-system reachability: a CFL-reachability saturation engine
//! answering "starting at state S with stack word W, which states are
//! reachable once the stack empties?" for a caller-defined alphabet of
//! states and stack elements.
//!
//! The engine never executes the pushdown system itself — it only relates
//! registered edges (and dynamically-resolved pop actions) into a fixpoint
//! over `Nop` reachability. See [`Analysis`] for the entry point.

mod action;
mod edge;
mod engine;
mod error;
mod functions;
mod graph;
mod node;
mod pretty;
mod work;

pub use action::{DynamicPopHandler, StackAction};
pub use edge::Edge;
pub use engine::{Analysis, AnalysisConfig};
#[cfg(feature = "telemetry")]
pub use engine::Telemetry;
pub use error::ReachabilityError;
pub use functions::{EdgeFn, UntargetedDynPopFn};
pub use graph::NodeStatus;
pub use node::Node;
pub use pretty::ToDot;
pub use work::{FifoWorkQueue, LifoWorkQueue, WorkItem, WorkQueue};
