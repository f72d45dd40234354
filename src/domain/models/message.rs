#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single entry of the chat transcript. Messages are never edited after
/// creation, a conversation only grows or gets cleared as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            id: format!("{role}-{}", Uuid::new_v4()),
            role,
            content: content.to_string(),
            timestamp: Local::now(),
        };
    }

    pub fn id(&self) -> &str {
        return &self.id;
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        return self.timestamp;
    }

    /// Hour and minute the message was created, as shown next to each chat
    /// bubble.
    pub fn time_label(&self) -> String {
        return self.timestamp.format("%H:%M").to_string();
    }
}
