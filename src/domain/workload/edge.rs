use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::utils::id::{FlowId, NodeId};
use crate::domain::workload::flow::Flow;

/// One hop of a flow, carrying the flow's timing attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub flow: FlowId,
    pub src: NodeId,
    pub snk: NodeId,

    /// `flow_priority * max_flow_length + hop_position`: a total order over the hops of all flows.
    pub priority: u64,
    pub period: u32,
    pub deadline: u32,

    /// Flow phase offset by the hop position.
    pub phase: u64,

    /// Transmission attempts budgeted for this hop.
    pub num_tx: u32,
}

impl Edge {
    /// Map key: `flow:src->snk` for directed maps, `(src,snk)` otherwise.
    pub fn label(&self, directed: bool) -> String {
        if directed { format!("{}:{}->{}", self.flow, self.src, self.snk) } else { format!("({},{})", self.src, self.snk) }
    }
}

/// Edges keyed by their label.
pub type EdgeMap = BTreeMap<String, Edge>;

/// Derives the edge map of `flows`.
///
/// Undirected maps store every edge with its endpoints in lexicographic order, so hops of
/// different flows between the same two nodes collapse into one entry. The first edge
/// inserted under a label is kept.
pub fn build_edge_map<'a>(flows: impl IntoIterator<Item = &'a Flow>, max_flow_length: usize, directed: bool) -> EdgeMap {
    let mut map = EdgeMap::new();

    for flow in flows {
        let tx_per_hop = flow.tx_attempts_per_link();

        for (position, pair) in flow.nodes.windows(2).enumerate() {
            let (mut src, mut snk) = (pair[0].clone(), pair[1].clone());
            if !directed && src > snk {
                std::mem::swap(&mut src, &mut snk);
            }

            let edge = Edge {
                flow: flow.name.clone(),
                src,
                snk,
                priority: flow.priority as u64 * max_flow_length as u64 + position as u64,
                period: flow.period,
                deadline: flow.deadline,
                phase: flow.phase as u64 + position as u64,
                num_tx: tx_per_hop.get(position).copied().unwrap_or(0),
            };

            map.entry(edge.label(directed)).or_insert(edge);
        }
    }

    map
}
