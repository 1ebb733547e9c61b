use chess::{Board, File, Rank, Square};

use crate::models::Orientation;

/// Draw `board` as text with the `orientation` side at the bottom.
/// White pieces are upper case, empty squares are dots.
pub fn render_board(board: &Board, orientation: Orientation) -> String {
    let (ranks, files): (Vec<usize>, Vec<usize>) = match orientation {
        Orientation::White => ((0..8).rev().collect(), (0..8).collect()),
        Orientation::Black => ((0..8).collect(), (0..8).rev().collect()),
    };

    let file_labels: String = files
        .iter()
        .map(|&file| format!(" {}", (b'a' + file as u8) as char))
        .collect();

    let mut out = String::new();
    for &rank in &ranks {
        out.push_str(&format!("{} ", rank + 1));
        for &file in &files {
            let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
            let symbol = match (board.piece_on(square), board.color_on(square)) {
                (Some(piece), Some(color)) => piece.to_string(color),
                _ => ".".to_string(),
            };
            out.push_str(&format!(" {}", symbol));
        }
        out.push('\n');
    }
    out.push_str(&format!("  {}\n", file_labels));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_at_the_bottom() {
        let text = render_board(&Board::default(), Orientation::White);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }

    #[test]
    fn black_at_the_bottom() {
        let text = render_board(&Board::default(), Orientation::Black);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1  R N B K Q B N R");
        assert_eq!(lines[4], "5  . . . . . . . .");
        assert_eq!(lines[7], "8  r n b k q b n r");
        assert_eq!(lines[8], "   h g f e d c b a");
    }
}
