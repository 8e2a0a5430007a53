//! Auto-Route Scheduler: send idle high-clarity users to the main interface
//!
//! Arming happens once per chat entry. After the configured delay the check
//! passes when
//!
//! `now - max(armed_at, last_interaction) > inactivity_threshold`
//!
//! and the user is still exactly on (APP_UNLOCKED, CONVERSATION).

use chrono::{DateTime, Utc};

use crate::config::FlowConfig;
use crate::core::timer::to_delta;
use crate::types::{GateState, ScreenState, UserProfile};

/// A pending inactivity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRouteCheck {
    pub armed_at: DateTime<Utc>,
    /// When the check should run
    pub due: DateTime<Utc>,
    inactivity_threshold: chrono::Duration,
}

impl AutoRouteCheck {
    /// Whether the user has been idle long enough and is still in the chat
    pub fn should_route(
        &self,
        now: DateTime<Utc>,
        last_interaction: Option<DateTime<Utc>>,
        gate: GateState,
        screen: ScreenState,
    ) -> bool {
        let since = last_interaction.map_or(self.armed_at, |t| t.max(self.armed_at));
        let idle = now - since > self.inactivity_threshold;
        idle && gate == GateState::AppUnlocked && screen == ScreenState::Conversation
    }
}

/// Decides whether a chat entry arms an inactivity check
#[derive(Debug, Clone)]
pub struct AutoRouteScheduler {
    delay: chrono::Duration,
    inactivity_threshold: chrono::Duration,
    high_clarity_threshold: u8,
}

impl AutoRouteScheduler {
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            delay: to_delta(config.auto_route_delay),
            inactivity_threshold: to_delta(config.inactivity_threshold),
            high_clarity_threshold: config.high_clarity_threshold,
        }
    }

    /// Arm for `profile` entering the chat at `now`; `None` below the
    /// high-clarity threshold or without a profile
    pub fn arm(&self, profile: Option<&UserProfile>, now: DateTime<Utc>) -> Option<AutoRouteCheck> {
        let profile = profile?;
        if !profile.is_high_clarity(self.high_clarity_threshold) {
            return None;
        }
        Some(AutoRouteCheck {
            armed_at: now,
            due: now + self.delay,
            inactivity_threshold: self.inactivity_threshold,
        })
    }
}

impl Default for AutoRouteScheduler {
    fn default() -> Self {
        Self::new(&FlowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Archetype;
    use chrono::Duration;

    fn profile(clarity: u8) -> UserProfile {
        UserProfile { archetype: Archetype::Builder, clarity }
    }

    #[test]
    fn test_arms_only_for_high_clarity() {
        let scheduler = AutoRouteScheduler::default();
        let now = Utc::now();

        assert!(scheduler.arm(Some(&profile(79)), now).is_none());
        assert!(scheduler.arm(None, now).is_none());

        let check = scheduler.arm(Some(&profile(80)), now).unwrap();
        assert_eq!(check.armed_at, now);
        assert_eq!(check.due, now + Duration::milliseconds(1500));
    }

    #[test]
    fn test_arming_follows_configured_threshold() {
        let config = FlowConfig {
            high_clarity_threshold: 50,
            ..FlowConfig::default()
        };
        let scheduler = AutoRouteScheduler::new(&config);
        let now = Utc::now();

        assert!(scheduler.arm(Some(&profile(50)), now).is_some());
        assert!(scheduler.arm(Some(&profile(49)), now).is_none());
    }

    #[test]
    fn test_idle_user_is_routed() {
        let now = Utc::now();
        let check = AutoRouteScheduler::default().arm(Some(&profile(85)), now).unwrap();

        assert!(check.should_route(
            check.due,
            None,
            GateState::AppUnlocked,
            ScreenState::Conversation
        ));
    }

    #[test]
    fn test_recent_interaction_blocks_route() {
        let now = Utc::now();
        let check = AutoRouteScheduler::default().arm(Some(&profile(85)), now).unwrap();
        let typed_at = now + Duration::milliseconds(1000);

        assert!(!check.should_route(
            check.due,
            Some(typed_at),
            GateState::AppUnlocked,
            ScreenState::Conversation
        ));
    }

    #[test]
    fn test_interaction_before_arming_is_ignored() {
        let now = Utc::now();
        let check = AutoRouteScheduler::default().arm(Some(&profile(85)), now).unwrap();
        let earlier = now - Duration::seconds(30);

        assert!(check.should_route(
            check.due,
            Some(earlier),
            GateState::AppUnlocked,
            ScreenState::Conversation
        ));
    }

    #[test]
    fn test_threshold_is_strict() {
        let now = Utc::now();
        let check = AutoRouteScheduler::default().arm(Some(&profile(85)), now).unwrap();
        let exactly = now + Duration::milliseconds(1000);

        assert!(!check.should_route(exactly, None, GateState::AppUnlocked, ScreenState::Conversation));
    }

    #[test]
    fn test_must_still_be_in_chat() {
        let now = Utc::now();
        let check = AutoRouteScheduler::default().arm(Some(&profile(85)), now).unwrap();

        assert!(!check.should_route(check.due, None, GateState::AppUnlocked, ScreenState::Landing));
        assert!(!check.should_route(check.due, None, GateState::Oath, ScreenState::Conversation));
    }
}
