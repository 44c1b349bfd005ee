pub mod id;
pub mod math;
