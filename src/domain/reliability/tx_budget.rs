/// Transmission budget of one flow, as computed by a [`TxBudgetPolicy`](super::budget_policy::TxBudgetPolicy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxBudget {
    /// Attempts budgeted per link under the selected fault model.
    pub num_tx_per_link: u32,

    /// One entry per hop, followed by the worst-case total number of transmissions
    /// needed to carry a message across the whole flow in isolation.
    pub link_tx_and_total_cost: Vec<u32>,
}

impl TxBudget {
    /// Worst-case total transmissions (the trailing aggregate entry).
    pub fn total_cost(&self) -> u32 {
        self.link_tx_and_total_cost.last().copied().unwrap_or(0)
    }

    /// Per-hop attempt counts without the trailing aggregate.
    pub fn tx_per_hop(&self) -> &[u32] {
        match self.link_tx_and_total_cost.split_last() {
            Some((_, hops)) => hops,
            None => &[],
        }
    }
}
