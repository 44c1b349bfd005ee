use crate::domain::reliability::budget_policy::{TxBudgetPolicy, effective_hops};
use crate::domain::reliability::fault_model::FaultModel;
use crate::domain::reliability::tx_budget::TxBudget;
use crate::domain::workload::flow::Flow;
use crate::error::ReliabilityError;

/// Bounded-adversary budgeting: every hop gets one successful transmission plus `num_faults` retries.
#[derive(Debug, Clone)]
pub struct FixedFaultPolicy {
    num_faults: u32,
}

impl FixedFaultPolicy {
    pub fn new(num_faults: u32) -> Self {
        FixedFaultPolicy { num_faults }
    }
}

impl TxBudgetPolicy for FixedFaultPolicy {
    fn fault_model(&self) -> FaultModel {
        FaultModel::Fixed
    }

    fn budget(&self, flow: &Flow) -> Result<TxBudget, ReliabilityError> {
        let hops = effective_hops(flow) as u32;
        let tx_per_link = self.num_faults + 1;

        // Which node ends up sending over an edge is unknown, so each hop carries the full cost.
        let mut link_tx_and_total_cost = vec![tx_per_link; hops as usize];
        link_tx_and_total_cost.push(hops + hops * self.num_faults);

        Ok(TxBudget { num_tx_per_link: tx_per_link, link_tx_and_total_cost })
    }
}
