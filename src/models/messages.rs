use serde::{Deserialize, Serialize};

/// A move as it travels over the wire
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: String,
    pub to: String,
}

/// Body posted to the move-log endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveLogRequest {
    #[serde(rename = "move")]
    pub mv: MoveRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

/// Acknowledgment returned by the move-log endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveLogAck {
    pub status: String,
    pub received: MoveRecord,
}

impl MoveLogAck {
    pub fn ok(received: MoveRecord) -> Self {
        MoveLogAck {
            status: "ok".to_string(),
            received,
        }
    }
}

/// Error body sent back for requests the server could not read
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorMessage {
    pub error: String,
}
