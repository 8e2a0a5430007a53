//! Startup overrides for the gate and screen
//!
//! Mirrors the developer shortcuts of the web build (`?stage=`, `?screen=`,
//! `?dev=1`). Unknown names are logged and ignored.

use crate::types::{GateState, ScreenState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOverrides {
    /// Gate name: oath, fund, stopped, app (or the canonical names)
    pub stage: Option<String>,
    /// Screen name: landing, assessment, results, conversation/atlas
    pub screen: Option<String>,
    /// Unlock the gate when no valid stage is given
    pub dev: bool,
}

impl BootstrapOverrides {
    pub fn is_empty(&self) -> bool {
        self.stage.is_none() && self.screen.is_none() && !self.dev
    }

    /// Gate to force, if any. A valid stage wins over the dev flag.
    pub fn gate(&self) -> Option<GateState> {
        let parsed = self.stage.as_deref().and_then(|s| match s.parse::<GateState>() {
            Ok(gate) => Some(gate),
            Err(e) => {
                tracing::debug!("bootstrap: {e}");
                None
            }
        });
        match parsed {
            Some(gate) => Some(gate),
            None if self.dev => Some(GateState::AppUnlocked),
            None => None,
        }
    }

    /// Screen to force, if the name is valid
    pub fn screen(&self) -> Option<ScreenState> {
        self.screen.as_deref().and_then(|s| match s.parse::<ScreenState>() {
            Ok(screen) => Some(screen),
            Err(e) => {
                tracing::debug!("bootstrap: {e}");
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(stage: Option<&str>, screen: Option<&str>, dev: bool) -> BootstrapOverrides {
        BootstrapOverrides {
            stage: stage.map(str::to_string),
            screen: screen.map(str::to_string),
            dev,
        }
    }

    #[test]
    fn stage_wins_over_dev() {
        assert_eq!(overrides(Some("fund"), None, true).gate(), Some(GateState::FundingPledge));
    }

    #[test]
    fn dev_applies_without_valid_stage() {
        assert_eq!(overrides(None, None, true).gate(), Some(GateState::AppUnlocked));
        assert_eq!(overrides(Some("nope"), None, true).gate(), Some(GateState::AppUnlocked));
        assert_eq!(overrides(Some("nope"), None, false).gate(), None);
    }

    #[test]
    fn invalid_screen_is_ignored() {
        assert_eq!(overrides(None, Some("atlas"), false).screen(), Some(ScreenState::Conversation));
        assert_eq!(overrides(None, Some("settings"), false).screen(), None);
    }

    #[test]
    fn empty() {
        assert!(BootstrapOverrides::default().is_empty());
        assert!(!overrides(None, None, true).is_empty());
    }
}
