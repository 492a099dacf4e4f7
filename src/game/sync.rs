//! Messages exchanged between game instances sharing one match.
//!
//! The transport itself lives outside the crate. Every message carries the
//! sender's [`InstanceId`] so a receiver can drop its own broadcasts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::chess_errors::ChessErrors;
use crate::history::move_record::MoveRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SyncPayload {
    Move(Box<MoveRecord>),
    Undo,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    pub sender: InstanceId,
    pub sent_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: SyncPayload,
}

impl SyncMessage {
    pub fn new(sender: InstanceId, payload: SyncPayload) -> Self {
        Self {
            sender,
            sent_at: Utc::now(),
            payload,
        }
    }

    #[inline]
    pub fn is_echo_of(&self, local: InstanceId) -> bool {
        self.sender == local
    }

    pub fn to_json(&self) -> Result<String, ChessErrors> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ChessErrors> {
        serde_json::from_str(text).map_err(|err| {
            warn!(error = %err, "undecodable sync message");
            ChessErrors::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_message_travels_as_tagged_json() {
        let sender = InstanceId::random();
        let message = SyncMessage::new(sender, SyncPayload::Undo);
        let json = message.to_json().unwrap();
        assert!(json.contains(r#""type":"undo""#));

        let decoded = SyncMessage::from_json(&json).unwrap();
        assert_eq!(decoded, message);
        assert!(decoded.is_echo_of(sender));
        assert!(!decoded.is_echo_of(InstanceId::random()));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            SyncMessage::from_json(r#"{"type":"teleport"}"#),
            Err(ChessErrors::Serialization(_))
        ));
    }
}
