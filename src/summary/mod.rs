pub mod builder;
pub mod contract;
pub mod environment;

pub use builder::build_summary;
pub use contract::contract_violations;
