pub mod reader;
pub mod value;

pub use reader::{parse_snapshot, ReadStats, Snapshot};
