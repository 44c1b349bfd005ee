//! Probabilistic transmission budgeting.
//!
//! The authoritative budget comes from a discrete-time sweep over the probability that the
//! message has reached each node of the chain. At time 0 the source holds the message with
//! certainty. In every step each hop whose receiver is still below the per-hop threshold
//! retransmits, moving probability mass forward with
//!
//! `P_rx(t) = (1 - M) * P_rx(t - 1) + M * P_tx(t - 1)`
//!
//! The sweep stops once the sink reaches the end-to-end target. The number of steps is the
//! worst-case cost of the flow in isolation; the per-hop retransmission counters are the
//! per-link budgets.

use crate::domain::reliability::budget_policy::{TxBudgetPolicy, effective_hops};
use crate::domain::reliability::fault_model::FaultModel;
use crate::domain::reliability::tx_budget::TxBudget;
use crate::domain::workload::flow::Flow;
use crate::error::ReliabilityError;

#[derive(Debug, Clone)]
pub struct ProbabilisticPolicy {
    /// Minimum packet reception rate (M).
    m: f64,
    e2e: f64,
    max_iterations: usize,
}

impl ProbabilisticPolicy {
    pub fn new(min_packet_reception_rate: f64, e2e: f64, max_iterations: usize) -> Self {
        ProbabilisticPolicy { m: min_packet_reception_rate, e2e, max_iterations }
    }

    /// Closed-form attempts per link: `ceil(ln(1 - e2e^(1/h)) / ln(1 - M))`, 1 for a lossless link.
    ///
    /// Returns `None` when the formula has no finite value (`e2e == 1.0`).
    pub fn closed_form_tx_per_link(&self, hops: usize) -> Option<u32> {
        if self.m >= 1.0 {
            return Some(1);
        }

        let per_hop_target = self.e2e.powf(1.0 / hops as f64);
        let n_tx = (1.0 - per_hop_target).ln() / (1.0 - self.m).ln();

        if n_tx.is_finite() { Some(n_tx.ceil().max(1.0) as u32) } else { None }
    }

    /// Runs the state-propagation sweep for a chain of `hops` links.
    ///
    /// # Returns
    /// The per-hop attempt counters followed by the number of steps the sink needed to reach `e2e`.
    pub fn sweep(&self, flow: &Flow, hops: usize) -> Result<Vec<u32>, ReliabilityError> {
        let node_count = hops + 1;
        let sink = node_count - 1;

        // max() guards against rounding of e2e^(1/h) when e2e == 1.0
        let min_link_reliability_needed = self.e2e.max(self.e2e.powf(1.0 / hops as f64));

        let mut pushes = vec![0u32; hops];
        let mut current = vec![0.0f64; node_count];
        current[0] = 1.0;

        let mut steps: usize = 0;

        while current[sink] < self.e2e {
            if steps >= self.max_iterations {
                log::error!(
                    "Reliability sweep of flow {} stopped after {} steps at {:.6}, target is {}.",
                    flow.name,
                    steps,
                    current[sink],
                    self.e2e
                );
                return Err(ReliabilityError::NotConverged {
                    flow: flow.name.clone(),
                    iterations: steps,
                    reached: current[sink],
                    target: self.e2e,
                });
            }

            let previous = std::mem::replace(&mut current, vec![0.0; node_count]);

            for hop in 0..hops {
                let (src, snk) = (hop, hop + 1);
                let prev_src_state = previous[src];
                let prev_snk_state = previous[snk];

                // Keep pushing until the receiver is reliable enough, but only once the sender may hold the message.
                let next_snk_state = if prev_snk_state < min_link_reliability_needed && prev_src_state > 0.0 {
                    pushes[hop] += 1;
                    (1.0 - self.m) * prev_snk_state + self.m * prev_src_state
                } else {
                    prev_snk_state
                };

                if current[src] < prev_src_state {
                    current[src] = prev_src_state;
                }
                current[snk] = next_snk_state;
            }

            steps += 1;
        }

        let mut link_tx_and_total_cost = pushes;
        link_tx_and_total_cost.push(steps as u32);

        Ok(link_tx_and_total_cost)
    }
}

impl TxBudgetPolicy for ProbabilisticPolicy {
    fn fault_model(&self) -> FaultModel {
        FaultModel::Probabilistic
    }

    fn budget(&self, flow: &Flow) -> Result<TxBudget, ReliabilityError> {
        let hops = effective_hops(flow);
        let link_tx_and_total_cost = self.sweep(flow, hops)?;

        let num_tx_per_link = match self.closed_form_tx_per_link(hops) {
            Some(n_tx) => n_tx,
            None => link_tx_and_total_cost[..hops].iter().copied().max().unwrap_or(1),
        };

        log::debug!(
            "Flow {}: {} tx per link (closed form), per hop and total {:?}.",
            flow.name,
            num_tx_per_link,
            link_tx_and_total_cost
        );

        Ok(TxBudget { num_tx_per_link, link_tx_and_total_cost })
    }
}
