//! Error types for the flow core.
//!
//! None of these reach the user. `Session` logs them and treats the request
//! as a no-op.

use crate::types::{GateEvent, GateState, ScreenState};

/// Why a gate or screen request was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("gate is stopped, {event} ignored")]
    GateStopped { event: GateEvent },

    #[error("gate already unlocked, {event} ignored")]
    GateUnlocked { event: GateEvent },

    #[error("screen {target} requires an unlocked gate (gate is {gate})")]
    GateLocked { gate: GateState, target: ScreenState },

    #[error("screen is already {0}")]
    SameScreen(ScreenState),

    #[error("assessment already has {0} answers")]
    AssessmentComplete(usize),

    #[error("answers are only accepted on the assessment screen (screen is {0})")]
    NotAssessing(ScreenState),

    #[error("retake is only offered on the results screen (screen is {0})")]
    NotOnResults(ScreenState),

    #[error("chat input is only accepted in the conversation (screen is {0})")]
    NotInConversation(ScreenState),

    #[error("no score yet, {0} needs a profile")]
    MissingProfile(ScreenState),

    #[error("message is empty")]
    EmptyMessage,
}

/// A bootstrap override that does not name a known state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: {value:?}")]
pub struct ParseStateError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseStateError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Response bank construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error("default response list must not be empty")]
    EmptyDefault,
}
