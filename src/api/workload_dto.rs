use serde::{Deserialize, Serialize};

use crate::domain::channels::channels::DEFAULT_NUM_CHANNELS;
use crate::domain::reliability::reliability_parameters::{DEFAULT_E2E, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_PACKET_RECEPTION_RATE, DEFAULT_NUM_FAULTS};

/// JSON description of a workload together with its reliability and channel options.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkLoadDto {
    pub name: String,

    #[serde(default = "default_min_packet_reception_rate")]
    pub min_packet_reception_rate: f64,

    #[serde(default = "default_e2e")]
    pub e2e: f64,

    #[serde(default)]
    pub num_faults: u32,

    #[serde(default = "default_num_channels")]
    pub num_channels: usize,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// One of `priority`, `dm`, `rm`, `rtHart`. No order is cached when absent.
    #[serde(default)]
    pub scheduling_order: Option<String>,

    pub flows: Vec<FlowDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FlowDto {
    pub name: String,
    pub nodes: Vec<String>,

    pub priority: Option<u32>,
    pub period: Option<u32>,
    pub deadline: Option<u32>,
    pub phase: Option<u32>,
}

fn default_min_packet_reception_rate() -> f64 {
    DEFAULT_MIN_PACKET_RECEPTION_RATE
}

fn default_e2e() -> f64 {
    DEFAULT_E2E
}

fn default_num_channels() -> usize {
    DEFAULT_NUM_CHANNELS
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for WorkLoadDto {
    fn default() -> Self {
        WorkLoadDto {
            name: String::new(),
            min_packet_reception_rate: DEFAULT_MIN_PACKET_RECEPTION_RATE,
            e2e: DEFAULT_E2E,
            num_faults: DEFAULT_NUM_FAULTS,
            num_channels: DEFAULT_NUM_CHANNELS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            scheduling_order: None,
            flows: Vec::new(),
        }
    }
}
