use crate::domain::utils::id::{ChannelId, NodeId};

/// A participant of the sensor network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: NodeId,

    /// Order in which the node was first seen while building the workload.
    pub index: usize,

    /// Node-level priority, 0 unless a caller assigns one. The hop position of a node
    /// inside a flow is not stored here, see [`Flow::node_position`](super::flow::Flow::node_position).
    pub priority: u32,

    /// Radio channel assigned by a scheduler, `None` until assigned.
    pub channel: Option<ChannelId>,
}

impl Node {
    pub fn new(name: NodeId, priority: u32, index: usize) -> Self {
        Node { name, index, priority, channel: None }
    }
}
