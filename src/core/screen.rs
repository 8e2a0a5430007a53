//! Screen State Machine
//!
//! Any screen may request any other. Preconditions that depend on data
//! (empty answers for the assessment, a profile for the chat) are checked
//! by the session before it asks for the change.

use crate::types::{ReasonCode, ScreenState, Transition};

#[derive(Debug, Clone, Default)]
pub struct ScreenStateMachine {
    state: ScreenState,
}

impl ScreenStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Move to `target`. Asking for the current screen is not a transition.
    pub fn request(&mut self, target: ScreenState, reason: ReasonCode) -> Option<Transition<ScreenState>> {
        if target == self.state {
            return None;
        }
        let from = self.state;
        self.state = target;
        Some(Transition { from, to: target, reason })
    }
}
