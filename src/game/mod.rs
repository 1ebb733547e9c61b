pub mod controller;
pub mod engine;
pub mod utils;

pub use controller::BoardController;
pub use engine::{ChessEngine, ProposedMove, RulesEngine};
