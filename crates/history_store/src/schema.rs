use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One chat message as written to disk. The stored record per identity key
/// is an ordered JSON array of these; `timestamp` is RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl StoredMessage {
    #[must_use]
    pub fn new(
        id: u64,
        text: impl Into<String>,
        sender: Sender,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: timestamp.into(),
        }
    }
}
