//! TELIOS: oath gate, purpose assessment and the ATLAS mentor chat
//!
//! The crate holds the decision logic only: gate and screen state machines,
//! the clarity scoring algorithm and the rule-based mentor. Rendering lives
//! in the caller (the bundled terminal front end is one such caller).

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// ASSESSMENT
// =============================================================================

/// Number of questions in the assessment
pub const QUESTION_COUNT: usize = 10;

/// Weight applied to the dominant archetype fraction
pub const CLARITY_DOMINANT_WEIGHT: f64 = 40.0;

/// Alignment bonus when questions 3, 8 and 9 are all answered non-D
pub const ALIGNMENT_BONUS_FULL: f64 = 30.0;
/// Alignment bonus otherwise
pub const ALIGNMENT_BONUS_PARTIAL: f64 = 15.0;

/// Commitment bonus when question 10 is answered non-D
pub const COMMITMENT_BONUS_FULL: f64 = 30.0;
/// Commitment bonus otherwise
pub const COMMITMENT_BONUS_PARTIAL: f64 = 10.0;

/// Zero-based positions of the alignment questions (3, 8, 9)
pub const ALIGNMENT_QUESTIONS: [usize; 3] = [2, 7, 8];

/// Zero-based position of the commitment question (10)
pub const COMMITMENT_QUESTION: usize = 9;

/// Upper bound for clarity
pub const CLARITY_MAX: u8 = 100;

// =============================================================================
// MENTOR TIMING [ms]
// =============================================================================

/// Clarity at or above which the mentor is assertive and auto-routing arms
pub const HIGH_CLARITY_THRESHOLD: u8 = 80;

/// Delay before the navigate confirmation lands
pub const CONFIRMATION_DELAY_MS: u64 = 300;

/// Delay before the auto-route inactivity check runs
pub const AUTO_ROUTE_DELAY_MS: u64 = 1500;

/// Inactivity required for the auto-route check to pass
pub const INACTIVITY_THRESHOLD_MS: u64 = 1000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
