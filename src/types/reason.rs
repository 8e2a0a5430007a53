//! Reason codes for gate and screen transitions

use serde::{Deserialize, Serialize};

/// Why the last gate or screen change happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    /// Fresh session, nothing happened yet
    R000_INITIAL,

    // =========================================================================
    // G: Gate
    // =========================================================================
    /// Oath accepted, pledge shown
    G001_OATH_ACCEPTED,
    /// Pledge accepted, app unlocked
    G002_PLEDGE_ACCEPTED,
    /// User declined the oath or the pledge
    G003_DECLINED,
    /// Gates skipped straight to the app
    G004_SKIPPED,
    /// Gate forced open by a navigation side effect
    G005_FORCED_UNLOCK,
    /// Gate set by the bootstrap hook
    G006_BOOTSTRAP,

    // =========================================================================
    // S: Screen
    // =========================================================================
    /// User asked for a screen
    S001_SCREEN_REQUESTED,
    /// Tenth answer recorded, results shown
    S002_ASSESSMENT_COMPLETE,
    /// Mentor chat opened with a fresh profile
    S003_CONVERSATION_ENTERED,
    /// Navigate intent confirmed by the mentor
    S004_NAVIGATE_INTENT,
    /// High-clarity user left the chat idle
    S005_AUTO_ROUTE,
    /// Restart: back to landing with answers cleared
    S006_RESTART,
    /// Screen set by the bootstrap hook
    S007_BOOTSTRAP,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R000_INITIAL => "R000_INITIAL",
            Self::G001_OATH_ACCEPTED => "G001_OATH_ACCEPTED",
            Self::G002_PLEDGE_ACCEPTED => "G002_PLEDGE_ACCEPTED",
            Self::G003_DECLINED => "G003_DECLINED",
            Self::G004_SKIPPED => "G004_SKIPPED",
            Self::G005_FORCED_UNLOCK => "G005_FORCED_UNLOCK",
            Self::G006_BOOTSTRAP => "G006_BOOTSTRAP",
            Self::S001_SCREEN_REQUESTED => "S001_SCREEN_REQUESTED",
            Self::S002_ASSESSMENT_COMPLETE => "S002_ASSESSMENT_COMPLETE",
            Self::S003_CONVERSATION_ENTERED => "S003_CONVERSATION_ENTERED",
            Self::S004_NAVIGATE_INTENT => "S004_NAVIGATE_INTENT",
            Self::S005_AUTO_ROUTE => "S005_AUTO_ROUTE",
            Self::S006_RESTART => "S006_RESTART",
            Self::S007_BOOTSTRAP => "S007_BOOTSTRAP",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R000_INITIAL => "Session started",
            Self::G001_OATH_ACCEPTED => "Oath accepted",
            Self::G002_PLEDGE_ACCEPTED => "Pledge accepted",
            Self::G003_DECLINED => "Access declined",
            Self::G004_SKIPPED => "Gates skipped",
            Self::G005_FORCED_UNLOCK => "Gate unlocked by navigation",
            Self::G006_BOOTSTRAP => "Gate set at startup",
            Self::S001_SCREEN_REQUESTED => "Screen requested",
            Self::S002_ASSESSMENT_COMPLETE => "Assessment complete",
            Self::S003_CONVERSATION_ENTERED => "Entered mentor chat",
            Self::S004_NAVIGATE_INTENT => "Mentor took you to the main interface",
            Self::S005_AUTO_ROUTE => "Auto-routed after inactivity",
            Self::S006_RESTART => "Restarted",
            Self::S007_BOOTSTRAP => "Screen set at startup",
        }
    }
}

impl Default for ReasonCode {
    fn default() -> Self {
        Self::R000_INITIAL
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
