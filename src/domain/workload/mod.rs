pub mod edge;
pub mod flow;
pub mod node;
pub mod ordering;
pub mod workload;

pub use edge::{Edge, EdgeMap};
pub use flow::Flow;
pub use node::Node;
pub use ordering::SchedulingOrder;
pub use workload::WorkLoad;
