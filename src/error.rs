use thiserror::Error;

use crate::domain::utils::id::{FlowId, NodeId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse workload JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Reliability analysis failed: {0}")]
    Reliability(#[from] ReliabilityError),

    #[error("Channel ledger error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),
}

/// Rejected configuration values. Ranges mirror the option bounds of the WARP system.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("minPacketReceptionRate {0} outside of [0.5, 1.0]")]
    MinPacketReceptionRateOutOfRange(f64),

    #[error("e2e {0} outside of [0.5, 1.0]")]
    E2eOutOfRange(f64),

    #[error("numFaults {0} outside of [0, 10]")]
    NumFaultsOutOfRange(u32),

    #[error("numChannels {0} outside of [1, 20]")]
    NumChannelsOutOfRange(usize),

    #[error("Flow {0} must have a period greater than zero")]
    ZeroPeriod(FlowId),

    #[error("The reliability sweep needs an iteration cap greater than zero")]
    ZeroIterationCap,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Flow {0} doesn't exist")]
    FlowNotFound(FlowId),

    #[error("Node {0} doesn't exist")]
    NodeNotFound(NodeId),

    #[error("A flow with name {0} already exists")]
    DuplicateFlow(FlowId),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReliabilityError {
    #[error("Flow {flow} did not reach e2e target {target} within {iterations} steps (reached {reached})")]
    NotConverged { flow: FlowId, iterations: usize, reached: f64, target: f64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Time slot {slot} is out of range, ledger holds {len} slots")]
    SlotOutOfRange { slot: usize, len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown fault model: {0}")]
    UnknownFaultModel(String),

    #[error("Unknown scheduling order: {0}")]
    UnknownSchedulingOrder(String),
}

pub type Result<T> = std::result::Result<T, Error>;
