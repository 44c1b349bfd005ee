pub mod channels;
pub mod reliability;
pub mod utils;
pub mod workload;
