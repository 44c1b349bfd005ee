use crate::domain::reliability::tx_budget::TxBudget;
use crate::domain::utils::id::{FlowId, NodeId};

pub const DEFAULT_PERIOD: u32 = 100;
pub const DEFAULT_DEADLINE: u32 = 100;
pub const DEFAULT_PHASE: u32 = 0;

/// A periodic, deadline-constrained message path from a source node to a sink node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    pub name: FlowId,

    /// Declaration order in the workload description.
    pub index: usize,

    /// Scheduling priority, lower values first. Defaults to the declaration order.
    pub priority: u32,

    pub period: u32,

    /// Deadline relative to each release.
    pub deadline: u32,

    /// Offset of the first release.
    pub phase: u32,

    /// Node chain from source to sink. The nodes themselves live in the workload's node map.
    pub nodes: Vec<NodeId>,

    /// Attempts budgeted per link under the selected fault model. 0 until the flow is finalized.
    pub num_tx_per_link: u32,

    /// Per-hop attempt counts plus the trailing worst-case total. Zero-filled, one entry per
    /// node, until the flow is finalized.
    pub link_tx_and_total_cost: Vec<u32>,
}

impl Flow {
    pub fn new(name: FlowId, priority: u32, index: usize) -> Self {
        Flow {
            name,
            index,
            priority,
            period: DEFAULT_PERIOD,
            deadline: DEFAULT_DEADLINE,
            phase: DEFAULT_PHASE,
            nodes: Vec::new(),
            num_tx_per_link: 0,
            link_tx_and_total_cost: Vec::new(),
        }
    }

    /// Appends `node` to the chain together with a zero placeholder in the cost list.
    pub fn push_node(&mut self, node: NodeId) {
        self.nodes.push(node);
        self.link_tx_and_total_cost.push(0);
    }

    pub fn num_hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Position of `node` in the chain, which is its priority within this flow.
    pub fn node_position(&self, node: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }

    pub fn apply_budget(&mut self, budget: TxBudget) {
        self.num_tx_per_link = budget.num_tx_per_link;
        self.link_tx_and_total_cost = budget.link_tx_and_total_cost;
    }

    /// Worst-case total transmissions, i.e. the last entry of the cost list.
    pub fn total_tx_attempts(&self) -> u32 {
        self.link_tx_and_total_cost.last().copied().unwrap_or(0)
    }

    /// Per-hop attempt counts, the cost list without its trailing total.
    pub fn tx_attempts_per_link(&self) -> &[u32] {
        match self.link_tx_and_total_cost.split_last() {
            Some((_, hops)) => hops,
            None => &[],
        }
    }

    /// First release at or after `current_time`.
    ///
    /// Widened to `u64`, releases after `u32::MAX` are still representable.
    pub fn next_release_time(&self, current_time: u32) -> u64 {
        if current_time <= self.phase || self.period == 0 {
            return self.phase as u64;
        }

        let elapsed = current_time - self.phase;
        let releases = elapsed.div_ceil(self.period) as u64;
        self.phase as u64 + releases * self.period as u64
    }

    /// Absolute deadline of the first release at or after `current_time`.
    pub fn next_absolute_deadline(&self, current_time: u32) -> u64 {
        self.next_release_time(current_time) + self.deadline as u64
    }
}
