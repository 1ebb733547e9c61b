//! Terminal board: renders the game and turns typed moves into drops.

use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::thread;

use crate::config::PlayConfig;
use crate::game::{BoardController, ChessEngine, ProposedMove};
use crate::game::utils::color_to_string;
use crate::notify::{deliver_moves, MoveLogClient, MoveNotifier};

pub mod commands;
pub mod render;

use commands::{Command, HELP};
use render::render_board;

/// Play one interactive session, posting accepted moves to the configured endpoint
pub fn play(config: PlayConfig) -> io::Result<()> {
    let (notifier, worker) = if config.offline {
        info!("Offline, moves will not be posted");
        (MoveNotifier::disabled(), None)
    } else {
        let (notifier, receiver) = MoveNotifier::channel();
        let endpoint = config.endpoint.clone();
        let timeout = config.timeout;
        let worker = thread::Builder::new()
            .name("move-notifier".to_string())
            .spawn(move || {
                actix_rt::System::new()
                    .block_on(deliver_moves(receiver, MoveLogClient::new(endpoint, timeout)))
            })?;
        (notifier, Some(worker))
    };

    let mut controller = BoardController::new(notifier);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut controller, stdin.lock(), stdout.lock())?;

    // Dropping the controller closes the channel so the worker can finish
    drop(controller);
    if let Some(worker) = worker {
        if worker.join().is_err() {
            warn!("Move notifier thread panicked");
        }
    }
    Ok(())
}

fn show<W: Write>(controller: &BoardController<ChessEngine>, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", render_board(&controller.engine().board(), controller.orientation()))?;
    match controller.game_over_message() {
        Some(message) => writeln!(out, "{} Type restart to play again.", message)?,
        None => writeln!(out, "{} to move.", color_to_string(controller.side_to_move()))?,
    }
    Ok(())
}

/// Read commands from `input` until it runs dry or the user quits
pub fn run_session<R: BufRead, W: Write>(
    controller: &mut BoardController<ChessEngine>,
    input: R,
    mut out: W,
) -> io::Result<()> {
    show(controller, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let mut proposal = ProposedMove::new(from, to);
                proposal.promotion = promotion;
                if controller.submit(proposal) {
                    show(controller, &mut out)?;
                } else if controller.is_terminal() {
                    writeln!(out, "The game is over. Type restart to play again.")?;
                } else {
                    writeln!(out, "Illegal move: {}{}", from, to)?;
                }
            }
            Command::Moves(square) => {
                let destinations: Vec<String> = controller
                    .legal_destinations(square)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                if destinations.is_empty() {
                    writeln!(out, "No legal moves from {}", square)?;
                } else {
                    writeln!(out, "{}: {}", square, destinations.join(" "))?;
                }
            }
            Command::Restart => {
                controller.restart();
                show(controller, &mut out)?;
            }
            Command::Board => show(controller, &mut out)?,
            Command::Fen => writeln!(out, "{}", controller.position())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RulesEngine;
    use crate::models::Orientation;

    fn session(script: &str) -> (BoardController<ChessEngine>, String) {
        let mut controller = BoardController::new(MoveNotifier::disabled());
        let mut out = Vec::new();
        run_session(&mut controller, script.as_bytes(), &mut out).unwrap();
        (controller, String::from_utf8(out).unwrap())
    }

    #[test]
    fn moves_are_played_and_board_flips() {
        let (controller, out) = session("e2e4\n");
        assert_eq!(controller.orientation(), Orientation::Black);
        assert!(out.contains("black to move."));
        // After the flip rank 1 is printed first
        let last_board = out.rsplit("\n\n").next().unwrap();
        assert!(last_board.starts_with("1 "));
    }

    #[test]
    fn illegal_and_malformed_input_is_reported() {
        let (controller, out) = session("e2e5\nx9y9\nmoves g1\n");
        assert!(out.contains("Illegal move: e2e5"));
        assert!(out.contains("Not a square: x9"));
        assert!(out.contains("g1: f3 h3"));
        assert_eq!(controller.position(), ChessEngine::default().position());
    }

    #[test]
    fn finished_game_refuses_moves_until_restart() {
        let (controller, out) = session("f2f3\ne7e5\ng2g4\nd8h4\na2a3\nrestart\ne2e4\n");
        assert!(out.contains("Checkmate! Black wins. Type restart to play again."));
        assert!(out.contains("The game is over."));
        assert_eq!(controller.side_to_move(), chess::Color::Black);
        assert_eq!(controller.game_over_message(), None);
    }

    #[test]
    fn quit_stops_reading() {
        let (controller, out) = session("fen\nquit\ne2e4\n");
        assert!(out.contains(&ChessEngine::default().position()));
        assert_eq!(controller.position(), ChessEngine::default().position());
    }
}
