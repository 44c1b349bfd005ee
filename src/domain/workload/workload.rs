use std::collections::HashMap;

use crate::api::workload_dto::WorkLoadDto;
use crate::domain::channels::channels::{Channels, DEFAULT_NUM_CHANNELS, validate_num_channels};
use crate::domain::reliability::fault_model::FaultModel;
use crate::domain::reliability::reliability_parameters::ReliabilityParameters;
use crate::domain::utils::id::{ChannelId, FlowId, NodeId};
use crate::domain::utils::math::lcm;
use crate::domain::workload::edge::{EdgeMap, build_edge_map};
use crate::domain::workload::flow::Flow;
use crate::domain::workload::node::Node;
use crate::domain::workload::ordering::{SchedulingOrder, order_flows, order_node_names};
use crate::error::{ConfigError, LookupError, Result};

const DEFAULT_NODE_PRIORITY: u32 = 0;

/// The nodes and flows of one workload plus the reliability parameters they are budgeted with.
///
/// Built once per run (or once per scheduling policy tried) and discarded afterwards. The
/// parameters are fixed at construction; budgeting under other parameters means building
/// a new `WorkLoad`.
#[derive(Debug, Clone)]
pub struct WorkLoad {
    name: String,
    parameters: ReliabilityParameters,

    /// Channel universe handed to the ledgers created by [`WorkLoad::new_channels`].
    num_channels: usize,

    flows: HashMap<FlowId, Flow>,
    nodes: HashMap<NodeId, Node>,

    flow_names_in_original_order: Vec<FlowId>,

    /// Result of the most recent `set_flows_in_*` call. Empty until one is made.
    flow_names_in_priority_order: Vec<FlowId>,
}

impl WorkLoad {
    pub fn new(name: impl Into<String>, parameters: ReliabilityParameters) -> Self {
        WorkLoad {
            name: name.into(),
            parameters,
            num_channels: DEFAULT_NUM_CHANNELS,
            flows: HashMap::new(),
            nodes: HashMap::new(),
            flow_names_in_original_order: Vec::new(),
            flow_names_in_priority_order: Vec::new(),
        }
    }

    pub fn with_num_channels(mut self, num_channels: usize) -> std::result::Result<Self, ConfigError> {
        self.num_channels = validate_num_channels(num_channels)?;
        Ok(self)
    }

    /// Builds and finalizes a workload from its JSON description.
    ///
    /// Flows are registered in file order, so declaration index and default priority follow
    /// the file. Every flow is budgeted with the fault model selected by `numFaults`, then the
    /// optional scheduling order is applied.
    pub fn from_dto(dto: WorkLoadDto) -> Result<Self> {
        let parameters = ReliabilityParameters::with_max_iterations(dto.min_packet_reception_rate, dto.e2e, dto.num_faults, dto.max_iterations)?;

        let mut workload = WorkLoad::new(dto.name, parameters).with_num_channels(dto.num_channels)?;

        for flow_dto in dto.flows {
            workload.add_flow(&flow_dto.name)?;

            for node_name in &flow_dto.nodes {
                workload.add_node_to_flow(&flow_dto.name, node_name)?;
            }

            if let Some(priority) = flow_dto.priority {
                workload.set_flow_priority(&flow_dto.name, priority)?;
            }
            if let Some(period) = flow_dto.period {
                workload.set_flow_period(&flow_dto.name, period)?;
            }
            if let Some(deadline) = flow_dto.deadline {
                workload.set_flow_deadline(&flow_dto.name, deadline)?;
            }
            if let Some(phase) = flow_dto.phase {
                workload.set_flow_phase(&flow_dto.name, phase)?;
            }
        }

        workload.finalize_all_flows()?;

        if let Some(order) = &dto.scheduling_order {
            let order: SchedulingOrder = order.parse()?;
            workload.set_flows_in_order(order);
        }

        log::info!(
            "WorkLoad {} built: {} flows, {} nodes, fault model {}.",
            workload.name,
            workload.flows.len(),
            workload.nodes.len(),
            workload.fault_model()
        );

        Ok(workload)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &ReliabilityParameters {
        &self.parameters
    }

    pub fn fault_model(&self) -> FaultModel {
        self.parameters.fault_model()
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// A fresh channel ledger for one scheduling attempt.
    pub fn new_channels(&self) -> Channels {
        Channels::new(self.num_channels)
    }

    pub fn flows(&self) -> &HashMap<FlowId, Flow> {
        &self.flows
    }

    pub fn nodes(&self) -> &HashMap<NodeId, Node> {
        &self.nodes
    }

    pub fn flow(&self, flow_name: &str) -> std::result::Result<&Flow, LookupError> {
        let id = FlowId::new(flow_name);
        match self.flows.get(&id) {
            Some(flow) => Ok(flow),
            None => {
                log::warn!("Flow {} doesn't exist but trying to retrieve it.", flow_name);
                Err(LookupError::FlowNotFound(id))
            }
        }
    }

    fn flow_mut(&mut self, flow_name: &str) -> std::result::Result<&mut Flow, LookupError> {
        let id = FlowId::new(flow_name);
        match self.flows.get_mut(&id) {
            Some(flow) => Ok(flow),
            None => {
                log::warn!("Flow {} doesn't exist but trying to modify it.", flow_name);
                Err(LookupError::FlowNotFound(id))
            }
        }
    }

    pub fn node(&self, node_name: &str) -> std::result::Result<&Node, LookupError> {
        let id = NodeId::new(node_name);
        match self.nodes.get(&id) {
            Some(node) => Ok(node),
            None => {
                log::warn!("Node {} doesn't exist.", node_name);
                Err(LookupError::NodeNotFound(id))
            }
        }
    }

    /// Registers a new flow. Priority and index both start at the number of flows already present.
    ///
    /// A second flow with the same name is rejected and the existing one is left untouched.
    pub fn add_flow(&mut self, flow_name: &str) -> std::result::Result<(), LookupError> {
        let id = FlowId::new(flow_name);
        if self.flows.contains_key(&id) {
            log::warn!("A flow with name {} already exists, ignoring the new declaration.", flow_name);
            return Err(LookupError::DuplicateFlow(id));
        }

        let index = self.flows.len();
        self.flows.insert(id.clone(), Flow::new(id.clone(), index as u32, index));
        self.flow_names_in_original_order.push(id);
        Ok(())
    }

    /// Appends `node_name` to the chain of `flow_name`, creating the node on first sight.
    pub fn add_node_to_flow(&mut self, flow_name: &str, node_name: &str) -> std::result::Result<(), LookupError> {
        let node_id = NodeId::new(node_name);
        let flow = self.flow_mut(flow_name)?;
        flow.push_node(node_id.clone());

        if !self.nodes.contains_key(&node_id) {
            let index = self.nodes.len();
            self.nodes.insert(node_id.clone(), Node::new(node_id, DEFAULT_NODE_PRIORITY, index));
        }
        Ok(())
    }

    pub fn set_flow_priority(&mut self, flow_name: &str, priority: u32) -> std::result::Result<(), LookupError> {
        self.flow_mut(flow_name)?.priority = priority;
        Ok(())
    }

    pub fn set_flow_period(&mut self, flow_name: &str, period: u32) -> Result<()> {
        let flow = self.flow_mut(flow_name)?;
        if period == 0 {
            log::warn!("Rejected period 0 for flow {}.", flow_name);
            return Err(ConfigError::ZeroPeriod(flow.name.clone()).into());
        }
        flow.period = period;
        Ok(())
    }

    pub fn set_flow_deadline(&mut self, flow_name: &str, deadline: u32) -> std::result::Result<(), LookupError> {
        self.flow_mut(flow_name)?.deadline = deadline;
        Ok(())
    }

    pub fn set_flow_phase(&mut self, flow_name: &str, phase: u32) -> std::result::Result<(), LookupError> {
        self.flow_mut(flow_name)?.phase = phase;
        Ok(())
    }

    pub fn flow_index(&self, flow_name: &str) -> std::result::Result<usize, LookupError> {
        Ok(self.flow(flow_name)?.index)
    }

    pub fn flow_priority(&self, flow_name: &str) -> std::result::Result<u32, LookupError> {
        Ok(self.flow(flow_name)?.priority)
    }

    pub fn flow_period(&self, flow_name: &str) -> std::result::Result<u32, LookupError> {
        Ok(self.flow(flow_name)?.period)
    }

    pub fn flow_deadline(&self, flow_name: &str) -> std::result::Result<u32, LookupError> {
        Ok(self.flow(flow_name)?.deadline)
    }

    pub fn flow_phase(&self, flow_name: &str) -> std::result::Result<u32, LookupError> {
        Ok(self.flow(flow_name)?.phase)
    }

    /// Position of `node_name` in the chain of `flow_name`, i.e. its priority within the flow.
    pub fn node_position_in_flow(&self, flow_name: &str, node_name: &str) -> std::result::Result<usize, LookupError> {
        let node_id = NodeId::new(node_name);
        self.flow(flow_name)?.node_position(&node_id).ok_or(LookupError::NodeNotFound(node_id))
    }

    pub fn nodes_in_flow(&self, flow_name: &str) -> std::result::Result<&[NodeId], LookupError> {
        Ok(&self.flow(flow_name)?.nodes)
    }

    pub fn node_index(&self, node_name: &str) -> std::result::Result<usize, LookupError> {
        Ok(self.node(node_name)?.index)
    }

    pub fn set_node_channel(&mut self, node_name: &str, channel: ChannelId) -> std::result::Result<(), LookupError> {
        let id = NodeId::new(node_name);
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.channel = Some(channel);
                Ok(())
            }
            None => {
                log::warn!("Node {} doesn't exist but trying to set its channel.", node_name);
                Err(LookupError::NodeNotFound(id))
            }
        }
    }

    pub fn node_channel(&self, node_name: &str) -> std::result::Result<Option<&ChannelId>, LookupError> {
        Ok(self.node(node_name)?.channel.as_ref())
    }

    /// Flow names in declaration order.
    pub fn flow_names(&self) -> &[FlowId] {
        &self.flow_names_in_original_order
    }

    /// Flow names in the order computed by the last `set_flows_in_*` call.
    pub fn flow_names_in_priority_order(&self) -> &[FlowId] {
        &self.flow_names_in_priority_order
    }

    /// Flow names ordered under `order`, computed from the current flow attributes.
    pub fn flow_names_in_order(&self, order: SchedulingOrder) -> Vec<FlowId> {
        order_flows(self.flows.values(), order)
    }

    pub fn set_flows_in_order(&mut self, order: SchedulingOrder) {
        self.flow_names_in_priority_order = self.flow_names_in_order(order);
        log::debug!("Flows in {} order: {:?}", order, self.flow_names_in_priority_order);
    }

    pub fn set_flows_in_priority_order(&mut self) {
        self.set_flows_in_order(SchedulingOrder::Priority);
    }

    pub fn set_flows_in_dm_order(&mut self) {
        self.set_flows_in_order(SchedulingOrder::DeadlineMonotonic);
    }

    pub fn set_flows_in_rm_order(&mut self) {
        self.set_flows_in_order(SchedulingOrder::RateMonotonic);
    }

    pub fn set_flows_in_real_time_hart_order(&mut self) {
        self.set_flows_in_order(SchedulingOrder::RealTimeHart);
    }

    /// Computes the transmission budget of `flow_name` under the workload's fault model and
    /// stores it on the flow, replacing any earlier budget.
    pub fn finalize_current_flow(&mut self, flow_name: &str) -> Result<()> {
        let policy = self.parameters.fault_model().get_instance(&self.parameters);
        let flow = self.flow_mut(flow_name)?;
        let budget = policy.budget(flow)?;

        log::debug!("Finalized flow {} ({}): {:?}", flow_name, policy.fault_model(), budget.link_tx_and_total_cost);
        flow.apply_budget(budget);
        Ok(())
    }

    /// Finalizes every flow in declaration order.
    pub fn finalize_all_flows(&mut self) -> Result<()> {
        for flow_name in self.flow_names_in_original_order.clone() {
            self.finalize_current_flow(flow_name.as_str())?;
        }
        Ok(())
    }

    /// Attempts budgeted per link (the flow's `num_tx_per_link`).
    pub fn flow_tx_attempts_per_link(&self, flow_name: &str) -> std::result::Result<u32, LookupError> {
        Ok(self.flow(flow_name)?.num_tx_per_link)
    }

    /// Per-hop attempt counts of `flow_name`, without the trailing total.
    pub fn num_tx_attempts_per_link(&self, flow_name: &str) -> std::result::Result<Vec<u32>, LookupError> {
        Ok(self.flow(flow_name)?.tx_attempts_per_link().to_vec())
    }

    /// Worst-case total transmissions of `flow_name` in isolation.
    pub fn total_tx_attempts_in_flow(&self, flow_name: &str) -> std::result::Result<u32, LookupError> {
        Ok(self.flow(flow_name)?.total_tx_attempts())
    }

    pub fn next_release_time(&self, flow_name: &str, current_time: u32) -> std::result::Result<u64, LookupError> {
        Ok(self.flow(flow_name)?.next_release_time(current_time))
    }

    pub fn next_absolute_deadline(&self, flow_name: &str, current_time: u32) -> std::result::Result<u64, LookupError> {
        Ok(self.flow(flow_name)?.next_absolute_deadline(current_time))
    }

    /// Node names in column order: numeric when every name is a non-negative integer,
    /// lexicographic otherwise.
    pub fn node_names_ordered_alphabetically(&self) -> Vec<NodeId> {
        order_node_names(self.nodes.keys())
    }

    /// Longest node chain over all flows, 0 without flows.
    pub fn max_flow_length(&self) -> usize {
        self.flows.values().map(|flow| flow.nodes.len()).max().unwrap_or(0)
    }

    /// Least common multiple of all flow periods, 1 without flows.
    ///
    /// `None` if the hyperperiod does not fit in a `u64`.
    pub fn hyper_period(&self) -> Option<u64> {
        let hyper_period = self.flows.values().try_fold(1u64, |hyper_period, flow| lcm(hyper_period, flow.period as u64));
        if hyper_period.is_none() {
            log::warn!("Hyperperiod of WorkLoad {} overflows u64.", self.name);
        }
        hyper_period
    }

    pub fn min_period(&self) -> Option<u32> {
        self.flows.values().map(|flow| flow.period).min()
    }

    pub fn max_phase(&self) -> Option<u32> {
        self.flows.values().map(|flow| flow.phase).max()
    }

    /// Edges of all flows, see [`build_edge_map`].
    pub fn edge_map(&self, directed: bool) -> EdgeMap {
        let flows = self.flow_names_in_original_order.iter().filter_map(|id| self.flows.get(id));
        build_edge_map(flows, self.max_flow_length(), directed)
    }
}
