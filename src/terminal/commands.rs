use chess::{Piece, Square};
use std::str::FromStr;
use thiserror::Error;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    },
    Moves(Square),
    Restart,
    Board,
    Fen,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Not a square: {0}")]
    InvalidSquare(String),

    #[error("Unknown promotion piece: {0}")]
    InvalidPromotion(char),

    #[error("Unknown command: {0} (type help)")]
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  e2e4, e2 e4, e2-e4   move a piece (e7e8q style promotions always queen)
  moves <square>       list legal destinations
  restart              start a new game
  board                show the board
  fen                  print the position
  help                 this text
  quit                 leave";

fn parse_square(text: &str) -> Result<Square, CommandError> {
    let valid = text.len() == 2
        && matches!(text.as_bytes()[0], b'a'..=b'h')
        && matches!(text.as_bytes()[1], b'1'..=b'8');
    if !valid {
        return Err(CommandError::InvalidSquare(text.to_string()));
    }
    Square::from_str(text).map_err(|_| CommandError::InvalidSquare(text.to_string()))
}

fn parse_promotion(c: char) -> Result<Piece, CommandError> {
    match c {
        'q' => Ok(Piece::Queen),
        'r' => Ok(Piece::Rook),
        'b' => Ok(Piece::Bishop),
        'n' => Ok(Piece::Knight),
        other => Err(CommandError::InvalidPromotion(other)),
    }
}

fn parse_move(text: &str) -> Result<Command, CommandError> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if compact.len() < 4 || compact.len() > 5 || !compact.is_ascii() {
        return Err(CommandError::Unknown(text.to_string()));
    }

    let from = parse_square(&compact[0..2])?;
    let to = parse_square(&compact[2..4])?;
    let promotion = match compact.chars().nth(4) {
        Some(c) => Some(parse_promotion(c)?),
        None => None,
    };
    Ok(Command::Move {
        from,
        to,
        promotion,
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();

        match (words.next(), words.next(), words.next()) {
            (Some("restart"), None, None) => Ok(Command::Restart),
            (Some("board"), None, None) => Ok(Command::Board),
            (Some("fen"), None, None) => Ok(Command::Fen),
            (Some("help"), None, None) => Ok(Command::Help),
            (Some("quit") | Some("exit"), None, None) => Ok(Command::Quit),
            (Some("moves"), Some(square), None) => Ok(Command::Moves(parse_square(square)?)),
            (Some(_), _, None) => parse_move(&line),
            _ => Err(CommandError::Unknown(line.clone())),
        }
    }
}
