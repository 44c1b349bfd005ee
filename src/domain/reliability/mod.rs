pub mod budget_policy;
pub mod fault_model;
pub mod fixed;
pub mod probabilistic;
pub mod reliability_parameters;
pub mod tx_budget;

pub use budget_policy::TxBudgetPolicy;
pub use fault_model::FaultModel;
pub use reliability_parameters::ReliabilityParameters;
pub use tx_budget::TxBudget;
