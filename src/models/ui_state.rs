use chess::Color;
use serde::{Deserialize, Serialize};

/// Which side is drawn at the bottom of the board
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    White,
    Black,
}

impl From<Color> for Orientation {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Orientation::White,
            Color::Black => Orientation::Black,
        }
    }
}

/// UI state derived from the current position after every change
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub orientation: Orientation,
    pub game_over_message: Option<String>,
}
