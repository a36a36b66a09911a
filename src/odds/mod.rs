pub mod normalizer;
pub mod selector;
pub mod window;

pub use normalizer::normalize_match_odds;
pub use selector::select_provider;
pub use window::MinuteWindow;
