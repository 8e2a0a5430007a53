//! Conversation Controller for the ATLAS mentor chat
//!
//! Owns the message log and the rotation counters. Timing side effects
//! (the navigate confirmation) are reported back to the session, which
//! schedules them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::core::cycler::{CyclerState, ResponseBank, ResponseVariantCycler};
use crate::core::intent::IntentClassifier;
use crate::types::{Archetype, ConversationLog, ConversationMessage, IntentKey, UserProfile};
use crate::HIGH_CLARITY_THRESHOLD;

/// Fixed mentor lines that are not part of the rotating bank
#[derive(Debug, Clone)]
pub struct MentorScript {
    guidance: HashMap<Archetype, String>,
    guidance_fallback: String,
    cta_assertive: String,
    cta_question: String,
    navigate_confirmation: String,
    high_clarity_threshold: u8,
}

impl MentorScript {
    pub fn standard() -> Self {
        let guidance = HashMap::from([
            (
                Archetype::Builder,
                "You execute through creation. Let's get you building - start with the first small step."
                    .to_string(),
            ),
            (
                Archetype::Warrior,
                "Discipline is your edge. Channel it into a concrete target this week.".to_string(),
            ),
            (
                Archetype::Teacher,
                "Your leverage is insight. Turn one idea into a system someone else can follow."
                    .to_string(),
            ),
        ]);
        Self {
            guidance,
            guidance_fallback: "Let's get aligned and moving.".to_string(),
            cta_assertive: "You're ready. I'll take you to the main interface now.".to_string(),
            cta_question: "Want me to take you to the main interface to continue?".to_string(),
            navigate_confirmation:
                "Taking you to the main interface. You can always come back to chat.".to_string(),
            high_clarity_threshold: HIGH_CLARITY_THRESHOLD,
        }
    }

    /// Replace or remove (with `None`) the guidance line for an archetype
    pub fn with_guidance(mut self, archetype: Archetype, line: Option<&str>) -> Self {
        match line {
            Some(line) => self.guidance.insert(archetype, line.to_string()),
            None => self.guidance.remove(&archetype),
        };
        self
    }

    pub fn with_high_clarity_threshold(mut self, threshold: u8) -> Self {
        self.high_clarity_threshold = threshold;
        self
    }

    /// "Your clarity score: 85%. Primary: Builder."
    pub fn intro(&self, profile: &UserProfile) -> String {
        format!(
            "Your clarity score: {}%. Primary: {}.",
            profile.clarity, profile.archetype
        )
    }

    pub fn guidance(&self, archetype: Archetype) -> &str {
        self.guidance
            .get(&archetype)
            .map(String::as_str)
            .unwrap_or(&self.guidance_fallback)
    }

    pub fn call_to_action(&self, clarity: u8) -> &str {
        if clarity >= self.high_clarity_threshold {
            &self.cta_assertive
        } else {
            &self.cta_question
        }
    }

    pub fn navigate_confirmation(&self) -> &str {
        &self.navigate_confirmation
    }
}

impl Default for MentorScript {
    fn default() -> Self {
        Self::standard()
    }
}

/// What a submitted message produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub intent: IntentKey,
    pub reply: String,
}

impl SubmitOutcome {
    /// The session must schedule the confirmation + move to landing
    pub fn wants_navigation(&self) -> bool {
        self.intent == IntentKey::Navigate
    }
}

/// Rule-based mentor
#[derive(Debug, Clone, Default)]
pub struct ConversationController {
    classifier: IntentClassifier,
    cycler: ResponseVariantCycler,
    script: MentorScript,
    rotation: CyclerState,
    log: ConversationLog,
}

impl ConversationController {
    pub fn new(bank: ResponseBank, script: MentorScript) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            cycler: ResponseVariantCycler::new(bank),
            script,
            rotation: CyclerState::new(),
            log: ConversationLog::new(),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn rotation(&self) -> &CyclerState {
        &self.rotation
    }

    pub fn script(&self) -> &MentorScript {
        &self.script
    }

    /// Seed the three opening lines if the log is empty.
    /// Returns whether anything was seeded.
    pub fn seed(&mut self, profile: &UserProfile, at: DateTime<Utc>) -> bool {
        if !self.log.is_empty() {
            return false;
        }
        let intro = self.script.intro(profile);
        let guidance = self.script.guidance(profile.archetype).to_string();
        let cta = self.script.call_to_action(profile.clarity).to_string();

        self.log.push(ConversationMessage::mentor(intro, at));
        self.log.push(ConversationMessage::mentor(guidance, at));
        self.log.push(ConversationMessage::mentor(cta, at));
        true
    }

    /// Handle a chat submission. Blank text changes nothing and returns `None`.
    pub fn submit(&mut self, text: &str, at: DateTime<Utc>) -> Option<SubmitOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let intent = self.classifier.classify(text);
        let reply = self.cycler.next(&mut self.rotation, intent);

        self.log.push(ConversationMessage::user(text, at));
        self.log.push(ConversationMessage::mentor(reply.clone(), at));

        Some(SubmitOutcome { intent, reply })
    }

    /// Append the navigate confirmation line
    pub fn confirm_navigation(&mut self, at: DateTime<Utc>) {
        let line = self.script.navigate_confirmation().to_string();
        self.log.push(ConversationMessage::mentor(line, at));
    }

    /// Clear the log. Rotation counters are kept.
    pub fn clear(&mut self) {
        self.log.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
