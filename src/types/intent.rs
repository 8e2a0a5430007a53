//! Intent keys for free-text chat input

use serde::{Deserialize, Serialize};

/// Classification bucket of a chat message, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKey {
    /// Wants to leave the chat for the main interface
    Navigate,
    Purpose,
    Fear,
    Quit,
    Build,
    /// Nothing matched
    Default,
}

impl IntentKey {
    /// All keys, in classification priority order
    pub const ALL: [IntentKey; 6] = [
        IntentKey::Navigate,
        IntentKey::Purpose,
        IntentKey::Fear,
        IntentKey::Quit,
        IntentKey::Build,
        IntentKey::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKey::Navigate => "navigate",
            IntentKey::Purpose => "purpose",
            IntentKey::Fear => "fear",
            IntentKey::Quit => "quit",
            IntentKey::Build => "build",
            IntentKey::Default => "default",
        }
    }
}

impl std::fmt::Display for IntentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
