use chess::{Board, Color, Piece, ALL_SQUARES};

use crate::game::engine::RulesEngine;

/// Convert a chess color to a string
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::White => "white".to_string(),
        Color::Black => "black".to_string(),
    }
}

/// Capitalized color name for user-facing messages
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Banner text for a finished game, `None` while the game is still running
pub fn game_over_message<E: RulesEngine>(engine: &E) -> Option<String> {
    if !engine.is_game_over() {
        return None;
    }

    let message = if engine.is_checkmate() {
        // The side to move is the one that got mated
        format!("Checkmate! {} wins.", color_name(!engine.side_to_move()))
    } else if engine.is_stalemate() {
        "Stalemate! It's a draw.".to_string()
    } else if engine.is_draw() {
        "Draw!".to_string()
    } else {
        "Game over!".to_string()
    };
    Some(message)
}

/// Check if the board has insufficient material for checkmate
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    let mut bishop_square_colors = Vec::new();

    for square in ALL_SQUARES {
        match board.piece_on(square) {
            None | Some(Piece::King) => {}
            Some(Piece::Knight) => minors += 1,
            Some(Piece::Bishop) => {
                minors += 1;
                bishop_square_colors
                    .push((square.get_rank().to_index() + square.get_file().to_index()) % 2);
            }
            // Pawns, rooks and queens can always force mate
            Some(_) => return false,
        }
    }

    // King vs king, or a single minor piece against a bare king
    if minors <= 1 {
        return true;
    }

    // Only bishops left, all on squares of the same color
    bishop_square_colors.len() == minors
        && bishop_square_colors.windows(2).all(|pair| pair[0] == pair[1])
}
