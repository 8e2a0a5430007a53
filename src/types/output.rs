//! Read-only snapshot handed to the renderer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    ClarityBand, ConversationMessage, GateState, ReasonCode, ScoreResult, ScreenState, UserProfile,
};

/// Everything a renderer needs to draw the current screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateOutput {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    pub gate: GateState,
    pub screen: ScreenState,
    /// Answers recorded so far
    pub answered: usize,
    /// round(answered / 10 * 100)
    pub progress: u8,
    /// Question to show next on the assessment screen
    pub current_question: Option<usize>,
    pub score: Option<ScoreResult>,
    pub band: Option<ClarityBand>,
    pub profile: Option<UserProfile>,
    pub messages: Vec<ConversationMessage>,
    /// Deferred tasks still waiting to fire
    pub pending_tasks: usize,
    /// Reason for the latest gate or screen change
    pub reason: ReasonCode,
}

impl StateOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.gate.color_code();
        let reset = GateState::color_reset();

        format!(
            "{}gate={} | screen={} | progress={}% | {}{}",
            color,
            self.gate,
            self.screen,
            self.progress,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let clarity = self
            .score
            .map(|s| s.clarity.to_string())
            .unwrap_or_else(|| "-".to_string());
        let primary = self
            .score
            .map(|s| s.primary.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "gate={} | screen={} | answered={} | clarity={} | primary={} | messages={} | reason={}",
            self.gate,
            self.screen,
            self.answered,
            clarity,
            primary,
            self.messages.len(),
            self.reason.code()
        )
    }
}
