pub mod report;
pub mod status;

pub use report::render_report;
pub use status::{filter_in_play, log_in_play};
