//! Scoring Engine: ten answers → clarity score and archetype distribution
//!
//! clarity = round(max(A,B,C)/10 × 40 + alignment + commitment), capped at 100
//! - alignment: 30 if questions 3, 8, 9 are all non-D, else 15
//! - commitment: 30 if question 10 is non-D, else 10
//!
//! D answers never count toward an archetype percentage.

use crate::types::{AnswerSequence, Archetype, CategoryTag, ScoreResult};
use crate::{
    ALIGNMENT_BONUS_FULL, ALIGNMENT_BONUS_PARTIAL, ALIGNMENT_QUESTIONS, CLARITY_DOMINANT_WEIGHT,
    CLARITY_MAX, COMMITMENT_BONUS_FULL, COMMITMENT_BONUS_PARTIAL, COMMITMENT_QUESTION,
    QUESTION_COUNT,
};

/// Per-tag answer counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TagCounts {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl TagCounts {
    fn tally(answers: &[CategoryTag]) -> Self {
        let mut counts = Self::default();
        for tag in answers {
            match tag {
                CategoryTag::A => counts.a += 1,
                CategoryTag::B => counts.b += 1,
                CategoryTag::C => counts.c += 1,
                CategoryTag::D => counts.d += 1,
            }
        }
        counts
    }

    /// A + B + C; D is outside the percentage base
    fn archetype_total(&self) -> u32 {
        self.a + self.b + self.c
    }

    fn dominant(&self) -> u32 {
        self.a.max(self.b).max(self.c)
    }
}

/// Scoring engine for completed assessments
#[derive(Debug, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    /// Create new engine
    pub fn new() -> Self {
        Self
    }

    /// Score a complete sequence; `None` until all ten answers are in
    pub fn score(&self, answers: &AnswerSequence) -> Option<ScoreResult> {
        self.score_tags(answers.as_slice())
    }

    /// Score raw tags; `None` unless exactly ten are given
    pub fn score_tags(&self, answers: &[CategoryTag]) -> Option<ScoreResult> {
        if answers.len() != QUESTION_COUNT {
            return None;
        }

        let counts = TagCounts::tally(answers);
        let total = counts.archetype_total();

        let dominant_fraction = counts.dominant() as f64 / QUESTION_COUNT as f64;
        let raw = dominant_fraction * CLARITY_DOMINANT_WEIGHT
            + alignment_bonus(answers)
            + commitment_bonus(answers);
        let clarity = (raw.round() as u8).min(CLARITY_MAX);

        Some(ScoreResult {
            clarity,
            builder: percentage(counts.a, total),
            warrior: percentage(counts.b, total),
            teacher: percentage(counts.c, total),
            primary: primary_archetype(&counts),
        })
    }
}

/// round(count / total × 100), 0 when nothing counts
fn percentage(count: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}

fn alignment_bonus(answers: &[CategoryTag]) -> f64 {
    let aligned = ALIGNMENT_QUESTIONS
        .iter()
        .all(|&i| answers.get(i).is_some_and(|tag| !tag.is_reflective()));
    if aligned {
        ALIGNMENT_BONUS_FULL
    } else {
        ALIGNMENT_BONUS_PARTIAL
    }
}

fn commitment_bonus(answers: &[CategoryTag]) -> f64 {
    match answers.get(COMMITMENT_QUESTION) {
        Some(tag) if !tag.is_reflective() => COMMITMENT_BONUS_FULL,
        _ => COMMITMENT_BONUS_PARTIAL,
    }
}

/// Strict max wins; Builder is checked before Warrior, everything else is Teacher
fn primary_archetype(counts: &TagCounts) -> Archetype {
    if counts.a > counts.b && counts.a > counts.c {
        Archetype::Builder
    } else if counts.b > counts.a && counts.b > counts.c {
        Archetype::Warrior
    } else {
        Archetype::Teacher
    }
}

// =============================================================================
// TESTS
// =============================================================================
