pub mod enriched;
pub mod observation;
pub mod parameter;
