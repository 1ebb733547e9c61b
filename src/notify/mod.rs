//! Fire-and-forget move notifications.
//!
//! The controller only ever pushes events into a channel. Whatever sits on
//! the other end can be slow, failing or gone without the controller noticing.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::debug;

mod client;

pub use client::{deliver_moves, MoveLogClient, NotifyError};

/// A move that was accepted by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvent {
    pub game_id: String,
    pub from: String,
    pub to: String,
    /// FEN after the move
    pub position: String,
}

/// Sending half of the notification channel
#[derive(Debug, Clone)]
pub struct MoveNotifier {
    sender: Option<UnboundedSender<MoveEvent>>,
}

impl MoveNotifier {
    pub fn channel() -> (MoveNotifier, UnboundedReceiver<MoveEvent>) {
        let (sender, receiver) = mpsc::unbounded();
        (
            MoveNotifier {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A notifier that drops every event
    pub fn disabled() -> MoveNotifier {
        MoveNotifier { sender: None }
    }

    pub fn emit(&self, event: MoveEvent) {
        let Some(sender) = &self.sender else {
            return;
        };
        if let Err(e) = sender.unbounded_send(event) {
            debug!("Move notification dropped: {}", e);
        }
    }
}
