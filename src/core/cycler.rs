//! Response Variant Cycler: non-repeating rotation of canned replies per intent
//!
//! The bank is static data. Rotation counters live in a separate
//! [`CyclerState`] owned by the caller, so clearing the chat log never
//! touches them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::types::IntentKey;

/// Canned replies keyed by intent, plus the mandatory default list
#[derive(Debug, Clone)]
pub struct ResponseBank {
    lists: HashMap<IntentKey, Vec<String>>,
    default: Vec<String>,
}

impl ResponseBank {
    /// Create a bank with only the default list
    pub fn new<S: Into<String>>(default: Vec<S>) -> Result<Self, BankError> {
        let default: Vec<String> = default.into_iter().map(Into::into).collect();
        if default.is_empty() {
            return Err(BankError::EmptyDefault);
        }
        Ok(Self {
            lists: HashMap::new(),
            default,
        })
    }

    /// Add the list for one intent. Empty lists are dropped so the key falls
    /// back to the default list.
    pub fn with<S: Into<String>>(mut self, key: IntentKey, variants: Vec<S>) -> Self {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        if key == IntentKey::Default {
            if !variants.is_empty() {
                self.default = variants;
            }
            return self;
        }
        if variants.is_empty() {
            self.lists.remove(&key);
        } else {
            self.lists.insert(key, variants);
        }
        self
    }

    /// List used for `key` (the default list when the key has none)
    pub fn variants(&self, key: IntentKey) -> &[String] {
        self.lists.get(&key).unwrap_or(&self.default)
    }

    /// The ATLAS reply bank
    pub fn standard() -> Self {
        let bank = Self {
            lists: HashMap::new(),
            default: vec![
                "That's a real question. Let's dig deeper. What's driving this?".to_string(),
                "Slow down. Name the tension in one sentence.".to_string(),
                "Be specific. What outcome do you actually want?".to_string(),
            ],
        };
        bank.with(
            IntentKey::Purpose,
            vec![
                "Purpose isn't found - it's built. What's your next concrete action?",
                "Your purpose hides in your patterns. Where do you consistently show up strong?",
                "Purpose requires constraint. What will you stop doing this week?",
            ],
        )
        .with(
            IntentKey::Fear,
            vec![
                "Fear points to what matters. Name it precisely.",
                "You don't beat fear by thinking - by moving. What is the smallest step?",
                "Courage is commitment to action under uncertainty. What will you do today?",
            ],
        )
        .with(
            IntentKey::Quit,
            vec![
                "Are you quitting the grind or the goal? Those are different. Which is it?",
                "If you pause, what will you do with the energy you get back?",
                "Before stopping, define your finish line. What would \"done\" look like?",
            ],
        )
        .with(
            IntentKey::Build,
            vec![
                "Good. Define step one so small it's embarrassing.",
                "Block 45 minutes on your calendar now. What will you build in that time?",
                "Who can hold you accountable for this week's target?",
            ],
        )
        .with(
            IntentKey::Navigate,
            vec![
                "I can take you there. Want to go to the main interface now?",
                "Ready to move? I can guide you to the interface.",
                "Let's jump into the app. Do you want the main screen?",
            ],
        )
    }
}

impl Default for ResponseBank {
    fn default() -> Self {
        Self::standard()
    }
}

/// Next-variant index per intent key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclerState {
    next: HashMap<IntentKey, usize>,
}

impl CyclerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next draw for `key` will use (before wrapping)
    pub fn position(&self, key: IntentKey) -> usize {
        self.next.get(&key).copied().unwrap_or(0)
    }

    /// Forget every counter
    pub fn reset(&mut self) {
        self.next.clear();
    }
}

/// Draws replies from a bank, rotating per key
#[derive(Debug, Clone, Default)]
pub struct ResponseVariantCycler {
    bank: ResponseBank,
}

impl ResponseVariantCycler {
    pub fn new(bank: ResponseBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &ResponseBank {
        &self.bank
    }

    /// Return the next variant for `key` and advance its counter
    pub fn next(&self, state: &mut CyclerState, key: IntentKey) -> String {
        let list = self.bank.variants(key);
        let current = state.position(key) % list.len();
        state.next.insert(key, (current + 1) % list.len());
        list[current].clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
