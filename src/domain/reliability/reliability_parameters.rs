use crate::domain::reliability::fault_model::FaultModel;
use crate::error::ConfigError;

/// Lower bound for link and end-to-end reliabilities.
pub const MIN_RELIABILITY: f64 = 0.5;
/// Upper bound for link and end-to-end reliabilities.
pub const MAX_RELIABILITY: f64 = 1.0;
/// Maximum number of faults tolerated per hop.
pub const MAX_FAULTS: u32 = 10;

pub const DEFAULT_MIN_PACKET_RECEPTION_RATE: f64 = 0.9;
pub const DEFAULT_E2E: f64 = 0.99;
pub const DEFAULT_NUM_FAULTS: u32 = 0;

/// Step limit of the probabilistic reliability sweep.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Global reliability parameters of one workload.
///
/// Validated on construction and immutable afterwards; a different parameter set
/// means building a new `WorkLoad`. The fault model is derived from `num_faults`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReliabilityParameters {
    /// Guaranteed per-link, per-attempt delivery probability (M).
    min_packet_reception_rate: f64,

    /// End-to-end delivery probability every flow has to reach.
    e2e: f64,

    /// Faults tolerated per hop. Any value above zero selects `FaultModel::Fixed`.
    num_faults: u32,

    fault_model: FaultModel,

    /// Step cap of the probabilistic sweep.
    max_iterations: usize,
}

impl ReliabilityParameters {
    pub fn new(min_packet_reception_rate: f64, e2e: f64, num_faults: u32) -> Result<Self, ConfigError> {
        Self::with_max_iterations(min_packet_reception_rate, e2e, num_faults, DEFAULT_MAX_ITERATIONS)
    }

    pub fn with_max_iterations(min_packet_reception_rate: f64, e2e: f64, num_faults: u32, max_iterations: usize) -> Result<Self, ConfigError> {
        if !(MIN_RELIABILITY..=MAX_RELIABILITY).contains(&min_packet_reception_rate) {
            log::warn!("Rejected minPacketReceptionRate {}.", min_packet_reception_rate);
            return Err(ConfigError::MinPacketReceptionRateOutOfRange(min_packet_reception_rate));
        }

        if !(MIN_RELIABILITY..=MAX_RELIABILITY).contains(&e2e) {
            log::warn!("Rejected e2e {}.", e2e);
            return Err(ConfigError::E2eOutOfRange(e2e));
        }

        if num_faults > MAX_FAULTS {
            log::warn!("Rejected numFaults {}.", num_faults);
            return Err(ConfigError::NumFaultsOutOfRange(num_faults));
        }

        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }

        Ok(ReliabilityParameters {
            min_packet_reception_rate,
            e2e,
            num_faults,
            fault_model: FaultModel::from_num_faults(num_faults),
            max_iterations,
        })
    }

    pub fn min_packet_reception_rate(&self) -> f64 {
        self.min_packet_reception_rate
    }

    pub fn e2e(&self) -> f64 {
        self.e2e
    }

    pub fn num_faults(&self) -> u32 {
        self.num_faults
    }

    pub fn fault_model(&self) -> FaultModel {
        self.fault_model
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl Default for ReliabilityParameters {
    fn default() -> Self {
        ReliabilityParameters {
            min_packet_reception_rate: DEFAULT_MIN_PACKET_RECEPTION_RATE,
            e2e: DEFAULT_E2E,
            num_faults: DEFAULT_NUM_FAULTS,
            fault_model: FaultModel::from_num_faults(DEFAULT_NUM_FAULTS),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
