use crate::api::workload_dto::WorkLoadDto;
use crate::domain::workload::WorkLoad;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a workload description and computes the transmission budget of every flow.
pub fn generate_workload(file_path: &str) -> Result<WorkLoad> {
    logger::init();
    log::info!("Logger initialized. Starting WorkLoad construction.");

    let dto: WorkLoadDto = parse_json_file::<WorkLoadDto>(file_path)?;
    log::info!("JSON file '{}' parsed successfully.", file_path);

    let workload = WorkLoad::from_dto(dto)?;
    log::info!("WorkLoad {} constructed successfully.", workload.name());

    Ok(workload)
}
