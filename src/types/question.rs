//! The fixed question bank

use serde::Serialize;

use crate::types::CategoryTag;

/// One selectable option of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub text: &'static str,
    pub tag: CategoryTag,
}

/// A question with exactly four options, one per tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Zero-based position in the bank
    pub index: usize,
    pub prompt: &'static str,
    pub options: [QuestionOption; 4],
}

impl Question {
    /// Tag of the option at `choice` (0..4)
    pub fn tag_for(&self, choice: usize) -> Option<CategoryTag> {
        self.options.get(choice).map(|o| o.tag)
    }
}

const fn q(
    index: usize,
    prompt: &'static str,
    a: &'static str,
    b: &'static str,
    c: &'static str,
    d: &'static str,
) -> Question {
    Question {
        index,
        prompt,
        options: [
            QuestionOption { text: a, tag: CategoryTag::A },
            QuestionOption { text: b, tag: CategoryTag::B },
            QuestionOption { text: c, tag: CategoryTag::C },
            QuestionOption { text: d, tag: CategoryTag::D },
        ],
    }
}

/// The ten assessment questions, in order
pub const QUESTIONS: [Question; 10] = [
    q(
        0,
        "When do you feel most alive?",
        "Building something from nothing",
        "Protecting or serving others",
        "Sharing knowledge or guiding",
        "Alone in deep reflection",
    ),
    q(
        1,
        "A close friend calls in crisis. Your first instinct?",
        "Help them create a plan to solve it",
        "Drop everything and be there physically",
        "Listen deeply and help them find their answer",
        "Give them space but offer resources",
    ),
    q(
        2,
        "How would you want to be remembered?",
        "He built something that outlasted him",
        "He showed up when it mattered - protected and served",
        "He changed lives through wisdom",
        "He lived with complete authenticity",
    ),
    q(
        3,
        "Which challenge excites you most?",
        "Starting a business or creating something new",
        "Mastering a difficult physical or tactical skill",
        "Understanding complex topics deeply",
        "Exploring philosophical or existential questions",
    ),
    q(
        4,
        "What frustrates you most about the world?",
        "Inefficiency and broken systems",
        "Injustice and weakness being exploited",
        "Ignorance and people staying stuck",
        "Superficiality and inauthenticity",
    ),
    q(
        5,
        "With 6 months free, you'd spend most time...",
        "Building a project, business, or creative work",
        "Training, traveling to challenging environments",
        "Learning deeply and mentoring others",
        "Reflecting, writing, exploring ideas",
    ),
    q(
        6,
        "In a team working on a hard problem, you...",
        "Design the strategy others miss",
        "Take the hardest task and execute relentlessly",
        "Ensure everyone understands and mentor them",
        "Ask if we're solving the right problem",
    ),
    q(
        7,
        "What drives you more than anything?",
        "Turning vision into tangible reality",
        "Being someone others can count on",
        "Helping others see truth they missed",
        "Living in complete alignment with my values",
    ),
    q(
        8,
        "Which secretly scares you most?",
        "Dying without building something meaningful",
        "Being weak when someone needs me",
        "Staying mentally stagnant",
        "Living a life that isn't truly mine",
    ),
    q(
        9,
        "Right now, which project would you start today?",
        "Launch a business or creative venture",
        "Train for something physically demanding",
        "Create a course or start teaching",
        "None of these - I'm still searching",
    ),
];
