pub mod workload_dto;
