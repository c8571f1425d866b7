use history_store::{Sender, StoredMessage};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Seed message text for an identity with no stored history.
pub const WELCOME_TEXT: &str = "Hi! I'm Cracky, your AI assistant. I can help you with products, orders, and more. What can I help you with?";

/// Prefix for the reseed notice after a history clear.
pub const HISTORY_CLEARED_PREFIX: &str = "Chat history cleared. ";

/// Assistant bubble shown when the remote call fails for any reason other
/// than an authentication rejection.
pub const CONNECTIVITY_FALLBACK_TEXT: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Assistant bubble shown when the remote call is rejected with `401`.
pub const AUTH_FALLBACK_TEXT: &str =
    "Please log in to chat with Cracky. You can use the demo accounts: Alice, Bob, or Charlie.";

/// Canned prompts offered while the conversation holds only its seed.
pub const QUICK_ACTIONS: [&str; 6] = [
    "Show me all products",
    "What's in my cart?",
    "Place an order",
    "Show my order history",
    "Add red team t-shirt to cart",
    "Clear my cart",
];

#[must_use]
pub fn history_cleared_text() -> String {
    format!("{HISTORY_CLEARED_PREFIX}{WELCOME_TEXT}")
}

/// One chat bubble in the live transcript. Immutable once appended;
/// ordering is insertion order and ids are monotonic per conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Converts to the durable form, rendering the timestamp as RFC 3339
    /// text.
    pub fn to_stored(&self) -> Result<StoredMessage, time::error::Format> {
        Ok(StoredMessage::new(
            self.id,
            self.text.clone(),
            self.sender,
            self.timestamp.format(&Rfc3339)?,
        ))
    }

    /// Restores from the durable form. The store validates timestamps on
    /// load, so `None` only occurs for records produced outside it.
    #[must_use]
    pub fn from_stored(stored: &StoredMessage) -> Option<Self> {
        let timestamp = OffsetDateTime::parse(&stored.timestamp, &Rfc3339).ok()?;
        Some(Self {
            id: stored.id,
            text: stored.text.clone(),
            sender: stored.sender,
            timestamp,
        })
    }
}
