pub mod dataset;
pub mod edit;
pub mod quote;
pub mod status;
