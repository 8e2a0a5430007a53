//! Core types for TELIOS

mod answer;
mod intent;
mod message;
mod output;
mod question;
mod reason;
mod score;
mod state;

pub use answer::{AnswerSequence, CategoryTag};
pub use intent::IntentKey;
pub use message::{ConversationLog, ConversationMessage, Role};
pub use output::StateOutput;
pub use question::{Question, QuestionOption, QUESTIONS};
pub use reason::ReasonCode;
pub use score::{Archetype, ClarityBand, ScoreResult, UserProfile};
pub use state::{GateEvent, GateState, ScreenState, Transition};
