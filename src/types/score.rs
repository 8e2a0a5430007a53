//! Score, archetype and the profile snapshot handed to the mentor

use serde::{Deserialize, Serialize};

/// Behavioral category derived from the answer distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Builder,
    Warrior,
    Teacher,
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Archetype::Builder => "Builder",
            Archetype::Warrior => "Warrior",
            Archetype::Teacher => "Teacher",
        };
        write!(f, "{}", name)
    }
}

/// Result of scoring a complete answer sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0..=100
    pub clarity: u8,
    /// Share of A answers among A/B/C, 0..=100
    pub builder: u8,
    /// Share of B answers among A/B/C, 0..=100
    pub warrior: u8,
    /// Share of C answers among A/B/C, 0..=100
    pub teacher: u8,
    pub primary: Archetype,
}

impl ScoreResult {
    pub fn band(&self) -> ClarityBand {
        ClarityBand::from_clarity(self.clarity)
    }

    /// Archetype percentages in display order
    pub fn distribution(&self) -> [(Archetype, u8); 3] {
        [
            (Archetype::Builder, self.builder),
            (Archetype::Warrior, self.warrior),
            (Archetype::Teacher, self.teacher),
        ]
    }
}

/// Coarse clarity level used on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarityBand {
    /// >= 85
    High,
    /// >= 60
    Medium,
    /// >= 40
    Low,
    VeryLow,
}

impl ClarityBand {
    pub fn from_clarity(clarity: u8) -> Self {
        match clarity {
            85.. => ClarityBand::High,
            60..=84 => ClarityBand::Medium,
            40..=59 => ClarityBand::Low,
            _ => ClarityBand::VeryLow,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ClarityBand::High => "You know your direction. Time for execution.",
            ClarityBand::Medium => "You're close. Some refinement needed.",
            ClarityBand::Low => "You're searching - and that's where discovery begins.",
            ClarityBand::VeryLow => "You're in the wilderness. Let's find your North Star.",
        }
    }
}

/// Archetype and clarity captured when the user enters the mentor chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub archetype: Archetype,
    pub clarity: u8,
}

impl UserProfile {
    pub fn from_score(score: &ScoreResult) -> Self {
        Self {
            archetype: score.primary,
            clarity: score.clarity,
        }
    }

    /// Clarity at or above `threshold` (the configured high-clarity level)
    pub fn is_high_clarity(&self, threshold: u8) -> bool {
        self.clarity >= threshold
    }

    /// Header prompt shown above an empty chat
    pub fn readiness_prompt(&self) -> &'static str {
        match self.clarity {
            80.. => "You're ready. Execute. What's your first move?",
            60..=79 => "You're on the path. What question are you wrestling with?",
            _ => "You're searching. What feels most unclear right now?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ClarityBand::from_clarity(100), ClarityBand::High);
        assert_eq!(ClarityBand::from_clarity(85), ClarityBand::High);
        assert_eq!(ClarityBand::from_clarity(84), ClarityBand::Medium);
        assert_eq!(ClarityBand::from_clarity(60), ClarityBand::Medium);
        assert_eq!(ClarityBand::from_clarity(59), ClarityBand::Low);
        assert_eq!(ClarityBand::from_clarity(40), ClarityBand::Low);
        assert_eq!(ClarityBand::from_clarity(39), ClarityBand::VeryLow);
        assert_eq!(ClarityBand::from_clarity(0), ClarityBand::VeryLow);
    }

    #[test]
    fn test_readiness_prompt_tiers() {
        let mut profile = UserProfile { archetype: Archetype::Warrior, clarity: 80 };
        assert!(profile.readiness_prompt().starts_with("You're ready"));

        profile.clarity = 79;
        assert!(profile.readiness_prompt().starts_with("You're on the path"));

        profile.clarity = 59;
        assert!(profile.readiness_prompt().starts_with("You're searching"));
    }

    #[test]
    fn test_high_clarity_uses_given_threshold() {
        let profile = UserProfile { archetype: Archetype::Teacher, clarity: 76 };
        assert!(!profile.is_high_clarity(crate::HIGH_CLARITY_THRESHOLD));
        assert!(profile.is_high_clarity(76));
        assert!(!profile.is_high_clarity(77));
    }

    #[test]
    fn test_profile_snapshot() {
        let score = ScoreResult {
            clarity: 73,
            builder: 20,
            warrior: 60,
            teacher: 20,
            primary: Archetype::Warrior,
        };
        let profile = UserProfile::from_score(&score);
        assert_eq!(profile.archetype, Archetype::Warrior);
        assert_eq!(profile.clarity, 73);
    }
}
