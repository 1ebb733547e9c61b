use awc::error::{JsonPayloadError, SendRequestError};
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use log::{info, warn};
use std::time::Duration;
use thiserror::Error;

use crate::models::{MoveLogAck, MoveLogRequest, MoveRecord};
use crate::notify::MoveEvent;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Could not reach move log: {0}")]
    Send(#[from] SendRequestError),

    #[error("Move log answered with status {0}")]
    Status(u16),

    #[error("Unreadable acknowledgment: {0}")]
    Decode(#[from] JsonPayloadError),
}

/// HTTP client for the move-log endpoint
pub struct MoveLogClient {
    endpoint: String,
    client: awc::Client,
}

impl MoveLogClient {
    /// Must be created on the thread that runs the actix system using it
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        MoveLogClient {
            endpoint: endpoint.into(),
            client: awc::Client::builder().timeout(timeout).finish(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn post(&self, event: &MoveEvent) -> Result<MoveLogAck, NotifyError> {
        let request = MoveLogRequest {
            mv: MoveRecord {
                from: event.from.clone(),
                to: event.to.clone(),
            },
            game_id: Some(event.game_id.clone()),
        };

        let mut response = self.client.post(&self.endpoint).send_json(&request).await?;
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }
        Ok(response.json::<MoveLogAck>().await?)
    }
}

/// Post every event from `receiver` until the channel closes.
/// Failures are logged and skipped. Returns how many moves were acknowledged.
pub async fn deliver_moves(mut receiver: UnboundedReceiver<MoveEvent>, client: MoveLogClient) -> usize {
    info!("Delivering moves to {}", client.endpoint());
    let mut delivered = 0;

    while let Some(event) = receiver.next().await {
        match client.post(&event).await {
            Ok(ack) => {
                info!("Move {}{} acknowledged: {}", event.from, event.to, ack.status);
                delivered += 1;
            }
            Err(e) => warn!("Move {}{} not logged: {}", event.from, event.to, e),
        }
    }

    info!("Move channel closed, {} moves delivered", delivered);
    delivered
}
