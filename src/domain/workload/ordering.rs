use std::fmt;
use std::str::FromStr;

use crate::domain::utils::id::{FlowId, NodeId};
use crate::domain::workload::flow::Flow;
use crate::error::ConversionError;

/// Policies for ordering flows before slot-by-slot scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingOrder {
    /// By priority, ties broken by declaration order.
    Priority,

    /// Deadline monotonic: by deadline, ties broken by priority.
    DeadlineMonotonic,

    /// Rate monotonic: by period, ties broken by priority.
    RateMonotonic,

    /// RealTime-HART uses plain priority order.
    RealTimeHart,
}

impl FromStr for SchedulingOrder {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "priority" => Ok(SchedulingOrder::Priority),
            "dm" | "deadlinemonotonic" => Ok(SchedulingOrder::DeadlineMonotonic),
            "rm" | "ratemonotonic" => Ok(SchedulingOrder::RateMonotonic),
            "rthart" | "realtimehart" => Ok(SchedulingOrder::RealTimeHart),
            _ => Err(ConversionError::UnknownSchedulingOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulingOrder::Priority => "priority",
            SchedulingOrder::DeadlineMonotonic => "dm",
            SchedulingOrder::RateMonotonic => "rm",
            SchedulingOrder::RealTimeHart => "rtHart",
        };
        write!(f, "{}", name)
    }
}

/// Orders `flows` under `order` and returns their names.
///
/// The sort is stable over declaration order, so flows equal in both keys keep the order
/// in which they were declared.
pub fn order_flows<'a>(flows: impl IntoIterator<Item = &'a Flow>, order: SchedulingOrder) -> Vec<FlowId> {
    let mut sorted: Vec<&Flow> = flows.into_iter().collect();
    sorted.sort_by_key(|flow| flow.index);

    match order {
        SchedulingOrder::Priority | SchedulingOrder::RealTimeHart => sorted.sort_by_key(|flow| flow.priority),
        SchedulingOrder::DeadlineMonotonic => sorted.sort_by_key(|flow| (flow.deadline, flow.priority)),
        SchedulingOrder::RateMonotonic => sorted.sort_by_key(|flow| (flow.period, flow.priority)),
    }

    sorted.into_iter().map(|flow| flow.name.clone()).collect()
}

/// Sorts node names lexicographically, or numerically if every name is a non-negative integer.
///
/// Numeric names such as `"2"` and `"10"` would otherwise come out as `10, 2`.
pub fn order_node_names<'a>(names: impl IntoIterator<Item = &'a NodeId>) -> Vec<NodeId> {
    let mut sorted: Vec<NodeId> = names.into_iter().cloned().collect();
    sorted.sort();

    let numeric: Option<Vec<u64>> = sorted.iter().map(|name| parse_non_negative_integer(name.as_str())).collect();

    if let Some(values) = numeric {
        let mut keyed: Vec<(u64, NodeId)> = values.into_iter().zip(sorted).collect();
        keyed.sort();
        return keyed.into_iter().map(|(_, name)| name).collect();
    }

    sorted
}

fn parse_non_negative_integer(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse::<u64>().ok()
}
