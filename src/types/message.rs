//! Conversation log for the mentor chat
//!
//! Messages are appended in order and only ever removed all at once
//! (clear chat / restart).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    /// ATLAS
    Mentor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::User => "YOU",
            Role::Mentor => "ATLAS",
        };
        write!(f, "{}", name)
    }
}

/// A single chat line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }

    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Role::User, text, timestamp)
    }

    pub fn mentor(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Role::Mentor, text, timestamp)
    }
}

/// Ordered, append-only message log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<ConversationMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// Get all messages (oldest first)
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages from one role only
    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter().filter(move |m| m.role == role)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_order_and_clear() {
        let now = Utc::now();
        let mut log = ConversationLog::new();
        assert!(log.is_empty());

        log.push(ConversationMessage::mentor("hello", now));
        log.push(ConversationMessage::user("hi", now));
        log.push(ConversationMessage::mentor("what now?", now));

        assert_eq!(log.len(), 3);
        assert_eq!(log.messages()[1].role, Role::User);
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("what now?"));
        assert_eq!(log.by_role(Role::Mentor).count(), 2);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Mentor).unwrap(), "\"mentor\"");
        assert_eq!(format!("{}", Role::Mentor), "ATLAS");
    }
}
