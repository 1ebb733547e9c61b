use chess::{Board, BoardStatus, ChessMove, Color, Game, MoveGen, Piece, Square};
use std::str::FromStr;

use crate::game::utils::has_insufficient_material;

/// A move somebody wants to make, not yet checked against the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl ProposedMove {
    pub fn new(from: Square, to: Square) -> Self {
        ProposedMove {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, piece: Piece) -> Self {
        self.promotion = Some(piece);
        self
    }
}

/// What the board controller needs from a chess rules implementation.
///
/// Values are treated as immutable snapshots: `apply` returns a new value and
/// leaves `self` untouched, so the caller can keep the current state until the
/// candidate is known to be good. `Default` must yield the starting position.
pub trait RulesEngine: Clone + Default {
    /// Legal moves in the current position, optionally only those starting on `from`
    fn legal_moves(&self, from: Option<Square>) -> Vec<ProposedMove>;

    /// Apply `mv` to a copy of this state. `None` if the move is not legal.
    fn apply(&self, mv: &ProposedMove) -> Option<Self>;

    fn side_to_move(&self) -> Color;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    /// Any drawn outcome, stalemate included
    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw()
    }

    /// Serialized position (FEN)
    fn position(&self) -> String;
}

/// Rules engine backed by the `chess` crate.
///
/// `chess::Board` does not track the move counters, so they are kept here.
#[derive(Debug, Clone)]
pub struct ChessEngine {
    game: Game,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for ChessEngine {
    fn default() -> Self {
        ChessEngine {
            game: Game::new(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl ChessEngine {
    /// Start from an arbitrary position given as FEN. Missing move counters
    /// default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, chess::Error> {
        let board = Board::from_str(fen)?;
        let invalid = || chess::Error::InvalidFen {
            fen: fen.to_string(),
        };

        let mut counters = fen.split_whitespace().skip(4);
        let halfmove_clock = match counters.next() {
            Some(field) => field.parse::<u32>().map_err(|_| invalid())?,
            None => 0,
        };
        let fullmove_number = match counters.next() {
            Some(field) => field.parse::<u32>().map_err(|_| invalid())?,
            None => 1,
        };
        if fullmove_number == 0 {
            return Err(invalid());
        }

        Ok(ChessEngine {
            game: Game::new_with_board(board),
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn board(&self) -> Board {
        self.game.current_position()
    }

    /// Plies since the last capture or pawn move
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
}

impl RulesEngine for ChessEngine {
    fn legal_moves(&self, from: Option<Square>) -> Vec<ProposedMove> {
        let board = self.board();
        MoveGen::new_legal(&board)
            .filter(|m| from.map_or(true, |square| m.get_source() == square))
            .map(|m| ProposedMove {
                from: m.get_source(),
                to: m.get_dest(),
                promotion: m.get_promotion(),
            })
            .collect()
    }

    fn apply(&self, mv: &ProposedMove) -> Option<Self> {
        let board = self.board();

        // A promotion hint on a non-promoting move is ignored
        let chess_move: ChessMove = MoveGen::new_legal(&board).find(|m| {
            m.get_source() == mv.from
                && m.get_dest() == mv.to
                && (m.get_promotion().is_none() || m.get_promotion() == mv.promotion)
        })?;

        let resets_clock = board.piece_on(chess_move.get_source()) == Some(Piece::Pawn)
            || board.piece_on(chess_move.get_dest()).is_some();

        let mut candidate = self.clone();
        if !candidate.game.make_move(chess_move) {
            return None;
        }
        candidate.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if board.side_to_move() == Color::Black {
            candidate.fullmove_number += 1;
        }
        Some(candidate)
    }

    fn side_to_move(&self) -> Color {
        self.game.side_to_move()
    }

    fn is_checkmate(&self) -> bool {
        self.board().status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.board().status() == BoardStatus::Stalemate
    }

    fn is_draw(&self) -> bool {
        if self.is_checkmate() {
            return false;
        }
        // can_declare_draw only counts from the start of the game and resets
        // on castling-rights changes, so the fifty-move rule uses our own clock
        self.is_stalemate()
            || self.halfmove_clock >= 100
            || has_insufficient_material(&self.board())
            || self.game.can_declare_draw()
    }

    fn position(&self) -> String {
        // The board prints its own fixed counters; swap in ours
        let board = self.board().to_string();
        let fields: Vec<&str> = board.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let engine = ChessEngine::default();
        assert_eq!(engine.legal_moves(None).len(), 20);
        assert_eq!(engine.side_to_move(), Color::White);
        assert!(!engine.is_game_over());
    }

    #[test]
    fn legal_moves_filtered_by_origin() {
        let engine = ChessEngine::default();
        let mut destinations: Vec<String> = engine
            .legal_moves(Some(sq("e2")))
            .iter()
            .map(|m| m.to.to_string())
            .collect();
        destinations.sort();
        assert_eq!(destinations, vec!["e3", "e4"]);
        assert!(engine.legal_moves(Some(sq("e4"))).is_empty());
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let engine = ChessEngine::default();
        let before = engine.position();
        let next = engine.apply(&ProposedMove::new(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(engine.position(), before);
        assert_ne!(next.position(), before);
        assert_eq!(next.side_to_move(), Color::Black);
    }

    #[test]
    fn illegal_move_is_not_applied() {
        let engine = ChessEngine::default();
        assert!(engine.apply(&ProposedMove::new(sq("e2"), sq("e5"))).is_none());
        assert!(engine.apply(&ProposedMove::new(sq("e7"), sq("e5"))).is_none());
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut engine = ChessEngine::default();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            engine = engine.apply(&ProposedMove::new(sq(from), sq(to))).unwrap();
        }
        assert!(engine.is_checkmate());
        assert!(!engine.is_stalemate());
        assert!(!engine.is_draw());
        assert!(engine.is_game_over());
        assert_eq!(engine.side_to_move(), Color::White);
    }

    #[test]
    fn stalemate_counts_as_draw() {
        let engine = ChessEngine::from_fen("7k/4Q3/6K1/8/8/8/8/8 w - - 0 1").unwrap();
        let engine = engine.apply(&ProposedMove::new(sq("e7"), sq("f7"))).unwrap();
        assert!(engine.is_stalemate());
        assert!(engine.is_draw());
        assert!(!engine.is_checkmate());
    }

    #[test]
    fn bare_kings_are_a_draw() {
        let engine = ChessEngine::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        let engine = engine.apply(&ProposedMove::new(sq("e1"), sq("d2"))).unwrap();
        assert!(engine.is_draw());
        assert!(!engine.is_stalemate());
        assert!(engine.is_game_over());
    }

    #[test]
    fn starting_position_fen() {
        assert_eq!(
            ChessEngine::default().position(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn move_counters_advance() {
        let mut engine = ChessEngine::default();
        for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3")] {
            engine = engine.apply(&ProposedMove::new(sq(from), sq(to))).unwrap();
        }
        assert_eq!(engine.halfmove_clock(), 1);
        assert_eq!(engine.fullmove_number(), 2);
        assert!(engine.position().starts_with("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq"));
        assert!(engine.position().ends_with(" 1 2"));

        let engine = engine.apply(&ProposedMove::new(sq("b8"), sq("c6"))).unwrap();
        assert_eq!(engine.halfmove_clock(), 2);
        assert_eq!(engine.fullmove_number(), 3);
        // Nxe5 is a capture
        let engine = engine.apply(&ProposedMove::new(sq("f3"), sq("e5"))).unwrap();
        assert_eq!(engine.halfmove_clock(), 0);
        assert!(engine.position().ends_with(" 0 3"));
    }

    #[test]
    fn from_fen_keeps_counters() {
        let engine = ChessEngine::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 17 42").unwrap();
        assert_eq!(engine.halfmove_clock(), 17);
        assert_eq!(engine.fullmove_number(), 42);
        assert!(engine.position().ends_with(" 17 42"));

        assert!(ChessEngine::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - x 1").is_err());
    }

    #[test]
    fn fifty_move_rule_ignores_castling_rights_changes() {
        // The rook move drops the castling right but is still reversible
        let engine = ChessEngine::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 99 80").unwrap();
        assert!(!engine.is_draw());
        let engine = engine.apply(&ProposedMove::new(sq("a1"), sq("a2"))).unwrap();
        assert_eq!(engine.halfmove_clock(), 100);
        assert!(engine.is_draw());
        assert!(!engine.is_stalemate());
    }

    #[test]
    fn pawn_move_resets_the_clock_before_fifty_moves() {
        let engine = ChessEngine::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 99 80").unwrap();
        let engine = engine.apply(&ProposedMove::new(sq("e2"), sq("e3"))).unwrap();
        assert_eq!(engine.halfmove_clock(), 0);
        assert!(!engine.is_draw());
    }

    #[test]
    fn promotion_follows_the_hint() {
        let engine = ChessEngine::from_fen("8/P7/8/8/8/4k3/8/4K3 w - - 0 1").unwrap();
        let knight = ProposedMove::new(sq("a7"), sq("a8")).with_promotion(Piece::Knight);
        let next = engine.apply(&knight).unwrap();
        assert_eq!(next.board().piece_on(sq("a8")), Some(Piece::Knight));

        // A promoting move needs to say what it promotes to
        assert!(engine.apply(&ProposedMove::new(sq("a7"), sq("a8"))).is_none());
    }
}
