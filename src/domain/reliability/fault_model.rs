use std::fmt;
use std::str::FromStr;

use crate::domain::reliability::budget_policy::TxBudgetPolicy;
use crate::domain::reliability::fixed::FixedFaultPolicy;
use crate::domain::reliability::probabilistic::ProbabilisticPolicy;
use crate::domain::reliability::reliability_parameters::ReliabilityParameters;
use crate::error::ConversionError;

/// How per-hop transmission budgets are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultModel {
    /// Tolerate a fixed number of failed transmissions on every hop.
    Fixed,

    /// Meet a statistical end-to-end delivery target.
    Probabilistic,
}

impl FaultModel {
    /// `Fixed` as soon as at least one fault has to be tolerated, `Probabilistic` otherwise.
    pub fn from_num_faults(num_faults: u32) -> Self {
        if num_faults > 0 { FaultModel::Fixed } else { FaultModel::Probabilistic }
    }

    /// Factory for the budgeting policy implementing this fault model.
    pub fn get_instance(&self, parameters: &ReliabilityParameters) -> Box<dyn TxBudgetPolicy> {
        match self {
            FaultModel::Fixed => Box::new(FixedFaultPolicy::new(parameters.num_faults())),
            FaultModel::Probabilistic => Box::new(ProbabilisticPolicy::new(
                parameters.min_packet_reception_rate(),
                parameters.e2e(),
                parameters.max_iterations(),
            )),
        }
    }
}

impl FromStr for FaultModel {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FIXED" => Ok(FaultModel::Fixed),
            "PROBABILISTIC" => Ok(FaultModel::Probabilistic),
            _ => Err(ConversionError::UnknownFaultModel(s.to_string())),
        }
    }
}

impl fmt::Display for FaultModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultModel::Fixed => write!(f, "FIXED"),
            FaultModel::Probabilistic => write!(f, "PROBABILISTIC"),
        }
    }
}
