//! Intent Classifier: free text → intent key
//!
//! Ordered keyword groups, first match wins. Matching is plain substring
//! on the lower-cased text, so "stopped" still counts as "stop".

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::IntentKey;

lazy_static! {
    static ref RE_NAVIGATE: Regex = Regex::new(r"home|main|interface|dashboard|go back").unwrap();
    static ref RE_PURPOSE: Regex = Regex::new(r"purpose|meaning|mission").unwrap();
    static ref RE_FEAR: Regex = Regex::new(r"fear|afraid|scared|anxious|doubt").unwrap();
    static ref RE_QUIT: Regex = Regex::new(r"quit|leave|give up|stop").unwrap();
    static ref RE_BUILD: Regex = Regex::new(r"build|start|begin|launch|create").unwrap();

    /// Groups in priority order
    static ref GROUPS: [(IntentKey, &'static Regex); 5] = [
        (IntentKey::Navigate, &*RE_NAVIGATE),
        (IntentKey::Purpose, &*RE_PURPOSE),
        (IntentKey::Fear, &*RE_FEAR),
        (IntentKey::Quit, &*RE_QUIT),
        (IntentKey::Build, &*RE_BUILD),
    ];
}

/// Keyword classifier for mentor chat input
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Create new classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify text. Callers reject blank input before getting here.
    pub fn classify(&self, text: &str) -> IntentKey {
        let lowered = text.to_lowercase();
        GROUPS
            .iter()
            .find(|(_, re)| re.is_match(&lowered))
            .map(|(key, _)| *key)
            .unwrap_or(IntentKey::Default)
    }
}

// =============================================================================
// TESTS
// =============================================================================
