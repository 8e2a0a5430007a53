//! Gate and screen state definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseStateError;
use crate::types::ReasonCode;

/// A state change that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition<S> {
    pub from: S,
    pub to: S,
    pub reason: ReasonCode,
}

impl Transition<ScreenState> {
    /// True exactly when this change moved into the mentor chat
    pub fn entered_conversation(&self) -> bool {
        self.to == ScreenState::Conversation && self.from != ScreenState::Conversation
    }
}

/// The four states of the entry gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Oath shown, nothing decided yet
    Oath,
    /// Oath accepted, funding pledge shown
    FundingPledge,
    /// User declined, terminal
    Stopped,
    /// Gate passed, application screens reachable
    AppUnlocked,
}

impl GateState {
    /// No event moves the gate out of this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Stopped | GateState::AppUnlocked)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GateState::Oath => "\x1b[33m",          // Amber
            GateState::FundingPledge => "\x1b[33m", // Amber
            GateState::Stopped => "\x1b[31m",       // Red
            GateState::AppUnlocked => "\x1b[32m",   // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::Oath
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GateState::Oath => "oath",
            GateState::FundingPledge => "funding_pledge",
            GateState::Stopped => "stopped",
            GateState::AppUnlocked => "app_unlocked",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GateState {
    type Err = ParseStateError;

    /// Accepts the canonical names plus the short stage names `fund` and `app`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "oath" => Ok(GateState::Oath),
            "fund" | "funding_pledge" => Ok(GateState::FundingPledge),
            "stopped" => Ok(GateState::Stopped),
            "app" | "app_unlocked" => Ok(GateState::AppUnlocked),
            other => Err(ParseStateError::new("gate", other)),
        }
    }
}

/// Events the gate accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateEvent {
    Accept,
    Decline,
    Skip,
}

impl std::fmt::Display for GateEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GateEvent::Accept => "accept",
            GateEvent::Decline => "decline",
            GateEvent::Skip => "skip",
        };
        write!(f, "{}", name)
    }
}

/// Screens of the unlocked application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    Landing,
    Assessment,
    Results,
    /// The ATLAS mentor chat
    Conversation,
}

impl ScreenState {
    /// Screens that only make sense behind an unlocked gate
    pub fn requires_unlocked_gate(&self) -> bool {
        !matches!(self, ScreenState::Landing)
    }

    /// Title shown by the terminal front end
    pub fn title(&self) -> &'static str {
        match self {
            ScreenState::Landing => "TELIOS",
            ScreenState::Assessment => "Purpose Assessment",
            ScreenState::Results => "Your Purpose Profile",
            ScreenState::Conversation => "ATLAS - Your Purpose Mentor",
        }
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::Landing
    }
}

impl std::fmt::Display for ScreenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScreenState::Landing => "landing",
            ScreenState::Assessment => "assessment",
            ScreenState::Results => "results",
            ScreenState::Conversation => "conversation",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ScreenState {
    type Err = ParseStateError;

    /// `atlas` is accepted as an alias for the conversation screen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "landing" => Ok(ScreenState::Landing),
            "assessment" => Ok(ScreenState::Assessment),
            "results" => Ok(ScreenState::Results),
            "conversation" | "atlas" => Ok(ScreenState::Conversation),
            other => Err(ParseStateError::new("screen", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde() {
        let gates = [
            GateState::Oath,
            GateState::FundingPledge,
            GateState::Stopped,
            GateState::AppUnlocked,
        ];
        for gate in gates {
            let json = serde_json::to_string(&gate).unwrap();
            assert_eq!(format!("\"{gate}\""), json);
        }

        let screens = [
            ScreenState::Landing,
            ScreenState::Assessment,
            ScreenState::Results,
            ScreenState::Conversation,
        ];
        for screen in screens {
            let json = serde_json::to_string(&screen).unwrap();
            assert_eq!(format!("\"{screen}\""), json);
        }
    }

    #[test]
    fn parse_stage_aliases() {
        assert_eq!("fund".parse::<GateState>(), Ok(GateState::FundingPledge));
        assert_eq!("app".parse::<GateState>(), Ok(GateState::AppUnlocked));
        assert_eq!("atlas".parse::<ScreenState>(), Ok(ScreenState::Conversation));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "lobby".parse::<ScreenState>().unwrap_err();
        assert_eq!(err.kind, "screen");
        assert_eq!(err.value, "lobby");
        assert!("OATH".parse::<GateState>().is_err());
    }

    #[test]
    fn terminal_gates() {
        assert!(GateState::Stopped.is_terminal());
        assert!(GateState::AppUnlocked.is_terminal());
        assert!(!GateState::Oath.is_terminal());
        assert!(!GateState::FundingPledge.is_terminal());
    }

    #[test]
    fn landing_is_reachable_behind_any_gate() {
        assert!(!ScreenState::Landing.requires_unlocked_gate());
        assert!(ScreenState::Conversation.requires_unlocked_gate());
    }
}
