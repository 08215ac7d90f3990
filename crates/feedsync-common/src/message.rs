//! Wire types shared by the store client and the feed.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    #[serde(other)]
    Other,
}

/// A single chat message as served by the message store.
///
/// `id` is assigned by the store and increases monotonically. A `None` id
/// marks a local optimistic echo that the store has not confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Option<u64>,
    pub sender: Sender,
    #[serde(rename = "message")]
    pub text: String,
    /// ISO-8601 creation time.
    #[serde(default)]
    pub timestamp: String,
}

impl Message {
    pub fn is_confirmed(&self) -> bool {
        self.id.is_some()
    }
}

/// Body of `/api/history` and `/api/messages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBatch {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Body of `POST /api/send`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: String,
}

/// Successful answer to `POST /api/send`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub user_message: Option<Message>,
    #[serde(default)]
    pub bot_message: Option<Message>,
}

impl SendReceipt {
    /// Confirmed messages in display order (user first, then the reply).
    pub fn into_messages(self) -> Vec<Message> {
        self.user_message
            .into_iter()
            .chain(self.bot_message)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_deserializes_from_store_json() {
        let json = r#"{"id": 7, "sender": "bot", "message": "hi", "timestamp": "2024-05-01T10:00:00+00:00"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, Some(7));
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.text, "hi");
        assert!(msg.is_confirmed());
    }

    #[test]
    fn unknown_sender_maps_to_other() {
        let json = r#"{"id": 1, "sender": "system", "message": "x"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender, Sender::Other);
        assert!(msg.timestamp.is_empty());
    }

    #[test]
    fn null_id_is_unconfirmed() {
        let json = r#"{"id": null, "sender": "user", "message": "draft", "timestamp": ""}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(!msg.is_confirmed());
    }

    #[test]
    fn batch_without_messages_key_is_empty() {
        let batch: MessageBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.messages.is_empty());
    }

    #[test]
    fn receipt_skips_missing_messages() {
        let json = r#"{"user_message": {"id": 3, "sender": "user", "message": "q"}}"#;
        let receipt: SendReceipt = serde_json::from_str(json).unwrap();
        let msgs = receipt.into_messages();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].id, Some(3));
    }

    #[test]
    fn send_request_uses_message_key() {
        let body = serde_json::to_value(SendRequest {
            message: "hello".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message": "hello"}));
    }
}
