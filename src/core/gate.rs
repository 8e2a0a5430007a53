//! Gate State Machine: oath → funding pledge → unlocked
//!
//! State transitions:
//! - OATH → FUNDING_PLEDGE: accept
//! - FUNDING_PLEDGE → APP_UNLOCKED: accept
//! - OATH | FUNDING_PLEDGE → STOPPED: decline
//! - OATH | FUNDING_PLEDGE → APP_UNLOCKED: skip
//!
//! STOPPED and APP_UNLOCKED are final for user events.

use crate::error::TransitionError;
use crate::types::{GateEvent, GateState, ReasonCode, Transition};

/// Gate state holder
#[derive(Debug, Clone, Default)]
pub struct GateStateMachine {
    state: GateState,
}

impl GateStateMachine {
    /// Create new gate at the oath
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state
    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::AppUnlocked
    }

    /// Apply a user event
    pub fn transition(&mut self, event: GateEvent) -> Result<Transition<GateState>, TransitionError> {
        let (to, reason) = Self::compute_transition(self.state, event)?;
        Ok(self.apply(to, reason))
    }

    fn compute_transition(
        from: GateState,
        event: GateEvent,
    ) -> Result<(GateState, ReasonCode), TransitionError> {
        match (from, event) {
            (GateState::Stopped, _) => Err(TransitionError::GateStopped { event }),
            (GateState::AppUnlocked, _) => Err(TransitionError::GateUnlocked { event }),

            (_, GateEvent::Decline) => Ok((GateState::Stopped, ReasonCode::G003_DECLINED)),
            (_, GateEvent::Skip) => Ok((GateState::AppUnlocked, ReasonCode::G004_SKIPPED)),

            (GateState::Oath, GateEvent::Accept) => {
                Ok((GateState::FundingPledge, ReasonCode::G001_OATH_ACCEPTED))
            }
            (GateState::FundingPledge, GateEvent::Accept) => {
                Ok((GateState::AppUnlocked, ReasonCode::G002_PLEDGE_ACCEPTED))
            }
        }
    }

    /// Open the gate from a navigation side effect. A stopped gate stays
    /// stopped; an unlocked gate reports no change.
    pub fn force_unlock(&mut self) -> Option<Transition<GateState>> {
        match self.state {
            GateState::Stopped | GateState::AppUnlocked => None,
            _ => Some(self.apply(GateState::AppUnlocked, ReasonCode::G005_FORCED_UNLOCK)),
        }
    }

    /// Set any state. Only the bootstrap hook uses this.
    pub fn force(&mut self, state: GateState) -> Option<Transition<GateState>> {
        (state != self.state).then(|| self.apply(state, ReasonCode::G006_BOOTSTRAP))
    }

    fn apply(&mut self, to: GateState, reason: ReasonCode) -> Transition<GateState> {
        let from = self.state;
        self.state = to;
        Transition { from, to, reason }
    }
}

// =============================================================================
// TESTS
// =============================================================================
