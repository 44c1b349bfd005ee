use warp_reliability::domain::reliability::ReliabilityParameters;
use warp_reliability::domain::utils::id::{ChannelId, FlowId, NodeId};
use warp_reliability::domain::workload::{SchedulingOrder, WorkLoad};
use warp_reliability::error::{ConfigError, Error, LookupError};

fn empty_workload() -> WorkLoad {
    WorkLoad::new("Test", ReliabilityParameters::default())
}

fn add_flow_with_nodes(workload: &mut WorkLoad, flow_name: &str, nodes: &[&str]) {
    workload.add_flow(flow_name).unwrap();
    for node in nodes {
        workload.add_node_to_flow(flow_name, node).unwrap();
    }
}

fn flow_ids(names: &[&str]) -> Vec<FlowId> {
    names.iter().map(|name| FlowId::new(*name)).collect()
}

fn node_ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|name| NodeId::new(*name)).collect()
}

/// flow1 (priority 1, deadline 20), flow2 (3, 15), flow3 (2, 30)
fn three_flow_workload() -> WorkLoad {
    let mut workload = empty_workload();
    for (name, priority, deadline) in [("flow1", 1, 20), ("flow2", 3, 15), ("flow3", 2, 30)] {
        workload.add_flow(name).unwrap();
        workload.set_flow_priority(name, priority).unwrap();
        workload.set_flow_deadline(name, deadline).unwrap();
    }
    workload
}

#[test]
fn test_add_flow_uses_declaration_order_as_default_priority() {
    let mut workload = empty_workload();
    workload.add_flow("F0").unwrap();
    workload.add_flow("F1").unwrap();

    assert_eq!(workload.flow_priority("F1").unwrap(), 1);
    assert_eq!(workload.flow_index("F1").unwrap(), 1);
    assert_eq!(workload.flow_names(), flow_ids(&["F0", "F1"]).as_slice());
}

#[test]
fn test_duplicate_flow_is_rejected() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["A", "B"]);

    assert_eq!(workload.add_flow("F0"), Err(LookupError::DuplicateFlow(FlowId::new("F0"))));
    assert_eq!(workload.nodes_in_flow("F0").unwrap(), node_ids(&["A", "B"]).as_slice(), "existing flow stays untouched");
    assert_eq!(workload.flow_names().len(), 1);
}

#[test]
fn test_add_node_to_unknown_flow_is_an_error() {
    let mut workload = empty_workload();

    assert_eq!(workload.add_node_to_flow("missing", "A"), Err(LookupError::FlowNotFound(FlowId::new("missing"))));
    assert!(workload.nodes().is_empty());
}

#[test]
fn test_nodes_are_shared_between_flows() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["A", "B", "C"]);
    add_flow_with_nodes(&mut workload, "F1", &["C", "D"]);

    assert_eq!(workload.nodes().len(), 4);
    assert_eq!(workload.node_index("A").unwrap(), 0);
    assert_eq!(workload.node_index("D").unwrap(), 3);
    assert_eq!(workload.node_position_in_flow("F1", "C").unwrap(), 0);
    assert_eq!(workload.node_position_in_flow("F0", "C").unwrap(), 2);
    assert_eq!(workload.node_position_in_flow("F1", "A"), Err(LookupError::NodeNotFound(NodeId::new("A"))));
}

#[test]
fn test_unknown_flow_getters_are_errors() {
    let workload = empty_workload();

    assert!(workload.flow_period("nope").is_err());
    assert!(workload.flow_deadline("nope").is_err());
    assert!(workload.nodes_in_flow("nope").is_err());
    assert!(workload.total_tx_attempts_in_flow("nope").is_err());
    assert!(workload.next_release_time("nope", 0).is_err());
}

#[test]
fn test_zero_period_is_rejected() {
    let mut workload = empty_workload();
    workload.add_flow("F0").unwrap();

    assert!(matches!(workload.set_flow_period("F0", 0), Err(Error::Config(ConfigError::ZeroPeriod(_)))));
    assert_eq!(workload.flow_period("F0").unwrap(), 100);
}

#[test]
fn test_priority_order_is_empty_until_set() {
    let workload = three_flow_workload();
    assert!(workload.flow_names_in_priority_order().is_empty());
}

#[test]
fn test_dm_order() {
    let mut workload = three_flow_workload();
    workload.set_flows_in_dm_order();

    assert_eq!(workload.flow_names_in_priority_order(), flow_ids(&["flow2", "flow1", "flow3"]).as_slice());
}

#[test]
fn test_priority_order() {
    let mut workload = three_flow_workload();
    workload.set_flows_in_priority_order();

    assert_eq!(workload.flow_names_in_priority_order(), flow_ids(&["flow1", "flow3", "flow2"]).as_slice());
}

#[test]
fn test_rm_order_breaks_ties_by_priority() {
    let mut workload = three_flow_workload();
    workload.set_flow_period("flow1", 50).unwrap();
    workload.set_flow_period("flow2", 50).unwrap();
    workload.set_flow_period("flow3", 10).unwrap();

    workload.set_flows_in_rm_order();

    assert_eq!(workload.flow_names_in_priority_order(), flow_ids(&["flow3", "flow1", "flow2"]).as_slice());
}

#[test]
fn test_equal_priorities_keep_declaration_order() {
    let mut workload = empty_workload();
    for name in ["C", "A", "B"] {
        workload.add_flow(name).unwrap();
        workload.set_flow_priority(name, 7).unwrap();
    }

    workload.set_flows_in_real_time_hart_order();

    assert_eq!(workload.flow_names_in_priority_order(), flow_ids(&["C", "A", "B"]).as_slice());
}

#[test]
fn test_each_order_call_replaces_the_cached_list() {
    let mut workload = three_flow_workload();
    workload.set_flows_in_priority_order();
    workload.set_flows_in_dm_order();

    assert_eq!(workload.flow_names_in_priority_order(), flow_ids(&["flow2", "flow1", "flow3"]).as_slice());
}

#[test]
fn test_pure_order_follows_later_changes() {
    let mut workload = three_flow_workload();
    workload.set_flows_in_priority_order();
    workload.set_flow_priority("flow2", 0).unwrap();

    assert_eq!(workload.flow_names_in_order(SchedulingOrder::Priority), flow_ids(&["flow2", "flow1", "flow3"]));
    assert_eq!(workload.flow_names_in_priority_order(), flow_ids(&["flow1", "flow3", "flow2"]).as_slice(), "cached list is a snapshot");
}

#[test]
fn test_numeric_node_names_order_by_value() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["10", "2", "1"]);

    assert_eq!(workload.node_names_ordered_alphabetically(), node_ids(&["1", "2", "10"]));
}

#[test]
fn test_mixed_node_names_order_lexicographically() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["B", "A", "10"]);

    assert_eq!(workload.node_names_ordered_alphabetically(), node_ids(&["10", "A", "B"]));
}

#[test]
fn test_max_flow_length() {
    let mut workload = empty_workload();
    assert_eq!(workload.max_flow_length(), 0);

    add_flow_with_nodes(&mut workload, "F0", &["A", "B"]);
    add_flow_with_nodes(&mut workload, "F1", &["A", "C", "D", "E"]);

    assert_eq!(workload.max_flow_length(), 4);
}

#[test]
fn test_hyper_period_and_period_bounds() {
    let mut workload = empty_workload();
    assert_eq!(workload.hyper_period(), Some(1));
    assert_eq!(workload.min_period(), None);
    assert_eq!(workload.max_phase(), None);

    for (name, period, phase) in [("F0", 4, 0), ("F1", 6, 3), ("F2", 10, 1)] {
        workload.add_flow(name).unwrap();
        workload.set_flow_period(name, period).unwrap();
        workload.set_flow_phase(name, phase).unwrap();
    }

    assert_eq!(workload.hyper_period(), Some(60));
    assert_eq!(workload.min_period(), Some(4));
    assert_eq!(workload.max_phase(), Some(3));
}

#[test]
fn test_hyper_period_overflow_is_none() {
    let mut workload = empty_workload();
    for (name, period) in [("F0", 4_294_967_291), ("F1", 4_294_967_279), ("F2", 4_294_967_231)] {
        workload.add_flow(name).unwrap();
        workload.set_flow_period(name, period).unwrap();
    }

    assert_eq!(workload.hyper_period(), None);
    assert_eq!(workload.min_period(), Some(4_294_967_231));
}

#[test]
fn test_release_times() {
    let mut workload = empty_workload();
    workload.add_flow("F0").unwrap();
    workload.set_flow_period("F0", 10).unwrap();
    workload.set_flow_deadline("F0", 8).unwrap();
    workload.set_flow_phase("F0", 2).unwrap();

    assert_eq!(workload.next_release_time("F0", 0).unwrap(), 2);
    assert_eq!(workload.next_release_time("F0", 13).unwrap(), 22);
    assert_eq!(workload.next_absolute_deadline("F0", 13).unwrap(), 30);
}

#[test]
fn test_release_times_past_u32_max() {
    let mut workload = empty_workload();
    workload.add_flow("F0").unwrap();
    workload.set_flow_period("F0", 100).unwrap();
    workload.set_flow_phase("F0", 1).unwrap();

    assert_eq!(workload.next_release_time("F0", u32::MAX - 5).unwrap(), 4_294_967_301);
    assert_eq!(workload.next_absolute_deadline("F0", u32::MAX - 5).unwrap(), 4_294_967_401);
    assert_eq!(workload.next_release_time("F0", u32::MAX).unwrap(), 4_294_967_301);
}

#[test]
fn test_node_priority_is_independent_of_hop_position() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["A", "B", "C"]);

    assert_eq!(workload.node("C").unwrap().priority, 0);
    assert_eq!(workload.node_position_in_flow("F0", "C").unwrap(), 2);
}

#[test]
fn test_node_channel() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["A", "B"]);

    assert_eq!(workload.node_channel("A").unwrap(), None);
    workload.set_node_channel("A", ChannelId::new("5")).unwrap();
    assert_eq!(workload.node_channel("A").unwrap(), Some(&ChannelId::new("5")));

    assert_eq!(workload.set_node_channel("Z", ChannelId::new("1")), Err(LookupError::NodeNotFound(NodeId::new("Z"))));
    assert!(workload.node_channel("Z").is_err());
}

#[test]
fn test_directed_edge_map() {
    let mut workload = WorkLoad::new("Edges", ReliabilityParameters::new(0.9, 0.99, 1).unwrap());
    add_flow_with_nodes(&mut workload, "F0", &["A", "B", "C"]);
    add_flow_with_nodes(&mut workload, "F1", &["C", "B"]);
    workload.set_flow_phase("F0", 4).unwrap();
    workload.finalize_all_flows().unwrap();

    let edges = workload.edge_map(true);
    assert_eq!(edges.len(), 3);

    let second_hop = &edges["F0:B->C"];
    assert_eq!(second_hop.priority, 1);
    assert_eq!(second_hop.phase, 5);
    assert_eq!(second_hop.num_tx, 2);

    let reverse = &edges["F1:C->B"];
    assert_eq!(reverse.priority, 3);
    assert_eq!(reverse.src, NodeId::new("C"));
}

#[test]
fn test_edge_priority_folds_large_flow_priorities() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["A", "B", "C"]);
    workload.set_flow_priority("F0", 3_000_000_000).unwrap();
    workload.set_flow_phase("F0", u32::MAX).unwrap();

    let edges = workload.edge_map(true);

    assert_eq!(edges["F0:A->B"].priority, 9_000_000_000);
    assert_eq!(edges["F0:B->C"].priority, 9_000_000_001);
    assert_eq!(edges["F0:B->C"].phase, u32::MAX as u64 + 1);
}

#[test]
fn test_undirected_edge_map_merges_hops() {
    let mut workload = empty_workload();
    add_flow_with_nodes(&mut workload, "F0", &["A", "B", "C"]);
    add_flow_with_nodes(&mut workload, "F1", &["C", "B"]);

    let edges = workload.edge_map(false);
    assert_eq!(edges.len(), 2);

    let shared = &edges["(B,C)"];
    assert_eq!(shared.flow, FlowId::new("F0"), "first flow to declare the hop keeps it");
    assert_eq!(shared.src, NodeId::new("B"));
    assert_eq!(shared.num_tx, 0, "unfinalized flows carry zero budgets");
}

#[test]
fn test_new_channels_uses_configured_count() {
    let workload = empty_workload().with_num_channels(4).unwrap();
    let mut channels = workload.new_channels();
    channels.add_new_channel_set();

    assert_eq!(channels.num_channels(), 4);
    assert_eq!(channels.channel_set(0).unwrap().len(), 4);
    assert!(empty_workload().with_num_channels(25).is_err());
}
