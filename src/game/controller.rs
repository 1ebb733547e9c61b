use chess::{Color, Piece, Square};
use log::{debug, info};
use uuid::Uuid;

use crate::game::engine::{ChessEngine, ProposedMove, RulesEngine};
use crate::game::utils::{color_to_string, game_over_message};
use crate::models::{Orientation, UiState};
use crate::notify::{MoveEvent, MoveNotifier};

/// Owns the current game and the UI state derived from it.
///
/// Every accepted move replaces the engine value wholesale with a candidate
/// built from a copy, so a half-applied move is never observable.
pub struct BoardController<E: RulesEngine = ChessEngine> {
    engine: E,
    ui: UiState,
    game_id: String,
    notifier: MoveNotifier,
}

impl BoardController<ChessEngine> {
    pub fn new(notifier: MoveNotifier) -> Self {
        Self::with_engine(ChessEngine::default(), notifier)
    }
}

impl<E: RulesEngine> BoardController<E> {
    pub fn with_engine(engine: E, notifier: MoveNotifier) -> Self {
        let ui = derive_ui_state(&engine);
        BoardController {
            engine,
            ui,
            game_id: Uuid::new_v4().to_string(),
            notifier,
        }
    }

    /// Try to move the piece on `from` to `to`. Returns true if the move was made.
    pub fn propose_move(&mut self, from: Square, to: Square) -> bool {
        self.submit(ProposedMove::new(from, to))
    }

    /// Drop callback from the board renderer. The piece is not used for legality.
    pub fn on_piece_drop(&mut self, from: Square, to: Square, piece: &str) -> bool {
        debug!("Piece {} dropped from {} to {}", piece, from, to);
        self.propose_move(from, to)
    }

    /// Same as `propose_move`, but for a proposal that may carry a promotion
    /// hint. Promotions always become a queen whatever the hint says.
    pub fn submit(&mut self, proposal: ProposedMove) -> bool {
        if let Some(message) = &self.ui.game_over_message {
            debug!("Ignoring move {}{}: {}", proposal.from, proposal.to, message);
            return false;
        }

        let is_legal = self
            .engine
            .legal_moves(Some(proposal.from))
            .iter()
            .any(|m| m.to == proposal.to);
        if !is_legal {
            debug!("Rejected illegal move {}{}", proposal.from, proposal.to);
            return false;
        }

        let queened = ProposedMove {
            promotion: Some(Piece::Queen),
            ..proposal
        };
        let candidate = match self.engine.apply(&queened) {
            Some(candidate) => candidate,
            None => {
                debug!("Engine refused move {}{}", proposal.from, proposal.to);
                return false;
            }
        };

        self.engine = candidate;
        self.ui = derive_ui_state(&self.engine);
        info!(
            "Move {}{} made in game {}, {} to move",
            proposal.from,
            proposal.to,
            self.game_id,
            color_to_string(self.engine.side_to_move())
        );
        if let Some(message) = &self.ui.game_over_message {
            info!("Game {} finished: {}", self.game_id, message);
        }

        self.notifier.emit(MoveEvent {
            game_id: self.game_id.clone(),
            from: proposal.from.to_string(),
            to: proposal.to.to_string(),
            position: self.engine.position(),
        });
        true
    }

    /// Throw the current game away and start over from the initial position
    pub fn restart(&mut self) {
        self.engine = E::default();
        self.ui = derive_ui_state(&self.engine);
        self.game_id = Uuid::new_v4().to_string();
        info!("Restarted, new game {}", self.game_id);
    }

    /// Destinations the piece on `from` can legally reach
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut destinations: Vec<Square> = self
            .engine
            .legal_moves(Some(from))
            .into_iter()
            .map(|m| m.to)
            .collect();
        destinations.sort_by_key(|square| square.to_index());
        destinations.dedup();
        destinations
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn position(&self) -> String {
        self.engine.position()
    }

    pub fn side_to_move(&self) -> Color {
        self.engine.side_to_move()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn orientation(&self) -> Orientation {
        self.ui.orientation
    }

    pub fn game_over_message(&self) -> Option<&str> {
        self.ui.game_over_message.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.ui.game_over_message.is_some()
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }
}

fn derive_ui_state<E: RulesEngine>(engine: &E) -> UiState {
    UiState {
        orientation: Orientation::from(engine.side_to_move()),
        game_over_message: game_over_message(engine),
    }
}
