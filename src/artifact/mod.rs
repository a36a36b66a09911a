pub mod reader;
pub mod writer;

pub use reader::read_snapshot_file;
pub use writer::{write_json_atomic, write_text_atomic};
