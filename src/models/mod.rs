pub mod messages;
pub mod ui_state;

// Re-export important types
pub use messages::*;
pub use ui_state::*;
