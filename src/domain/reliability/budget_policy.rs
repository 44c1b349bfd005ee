use crate::domain::reliability::fault_model::FaultModel;
use crate::domain::reliability::tx_budget::TxBudget;
use crate::domain::workload::flow::Flow;
use crate::error::ReliabilityError;

/// Smallest node chain the engine budgets for. Shorter flows are treated as a single hop.
pub const MIN_FLOW_NODES: usize = 2;

/// A fault model's rule for turning a flow's node chain into a transmission budget.
pub trait TxBudgetPolicy {
    fn fault_model(&self) -> FaultModel;

    /// Computes the budget of `flow` in isolation. Only the length of the node chain matters.
    fn budget(&self, flow: &Flow) -> Result<TxBudget, ReliabilityError>;
}

/// Number of hops the engine budgets for `flow`, never less than one.
pub fn effective_hops(flow: &Flow) -> usize {
    let nodes = flow.nodes.len();
    if nodes < MIN_FLOW_NODES {
        log::warn!("Flow {} has {} node(s), budgeting it as a single hop.", flow.name, nodes);
        return MIN_FLOW_NODES - 1;
    }
    nodes - 1
}
