//! Answer tags and the append-only answer sequence

use serde::{Deserialize, Serialize};

use crate::QUESTION_COUNT;

/// Category tag carried by every answer option
///
/// A, B and C map to the Builder, Warrior and Teacher archetypes.
/// D is the reflective option and never counts toward an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryTag {
    A,
    B,
    C,
    D,
}

impl CategoryTag {
    /// Parse a single letter (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(CategoryTag::A),
            'B' => Some(CategoryTag::B),
            'C' => Some(CategoryTag::C),
            'D' => Some(CategoryTag::D),
            _ => None,
        }
    }

    /// Parse a whole string of letters, e.g. `"AABCDDCBAA"`
    ///
    /// Whitespace and commas are skipped. Any other character fails the parse.
    pub fn parse_many(s: &str) -> Option<Vec<Self>> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Self::from_char)
            .collect()
    }

    pub fn is_reflective(&self) -> bool {
        *self == CategoryTag::D
    }
}

impl std::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            CategoryTag::A => "A",
            CategoryTag::B => "B",
            CategoryTag::C => "C",
            CategoryTag::D => "D",
        };
        write!(f, "{}", c)
    }
}

/// Ordered answers, one per question, append-only until cleared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSequence {
    answers: Vec<CategoryTag>,
}

impl AnswerSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an answer. Returns false (and changes nothing) once complete.
    pub fn push(&mut self, tag: CategoryTag) -> bool {
        if self.is_complete() {
            return false;
        }
        self.answers.push(tag);
        true
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= QUESTION_COUNT
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<CategoryTag> {
        self.answers.get(index).copied()
    }

    pub fn as_slice(&self) -> &[CategoryTag] {
        &self.answers
    }

    /// Index of the question to show next, `None` once complete
    pub fn current_question(&self) -> Option<usize> {
        (!self.is_complete()).then_some(self.answers.len())
    }

    /// round(len / 10 * 100)
    pub fn progress_percent(&self) -> u8 {
        let pct = (self.answers.len() as f64 / QUESTION_COUNT as f64) * 100.0;
        pct.round() as u8
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

impl From<Vec<CategoryTag>> for AnswerSequence {
    /// Anything past the tenth answer is dropped.
    fn from(mut answers: Vec<CategoryTag>) -> Self {
        answers.truncate(QUESTION_COUNT);
        Self { answers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stops_at_ten() {
        let mut seq = AnswerSequence::new();
        for _ in 0..QUESTION_COUNT {
            assert!(seq.push(CategoryTag::A));
        }
        assert!(seq.is_complete());
        assert!(!seq.push(CategoryTag::B));
        assert_eq!(seq.len(), QUESTION_COUNT);
        assert_eq!(seq.get(9), Some(CategoryTag::A));
    }

    #[test]
    fn test_progress_and_current_question() {
        let mut seq = AnswerSequence::new();
        assert_eq!(seq.progress_percent(), 0);
        assert_eq!(seq.current_question(), Some(0));

        seq.push(CategoryTag::C);
        seq.push(CategoryTag::D);
        seq.push(CategoryTag::A);
        assert_eq!(seq.progress_percent(), 30);
        assert_eq!(seq.current_question(), Some(3));

        seq.clear();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_parse_many() {
        let tags = CategoryTag::parse_many("ab, c d").unwrap();
        assert_eq!(tags, vec![CategoryTag::A, CategoryTag::B, CategoryTag::C, CategoryTag::D]);
        assert!(CategoryTag::parse_many("abx").is_none());
    }

    #[test]
    fn test_from_vec_truncates() {
        let seq = AnswerSequence::from(vec![CategoryTag::B; 12]);
        assert_eq!(seq.len(), QUESTION_COUNT);
        assert!(seq.is_complete());
    }
}
