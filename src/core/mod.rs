//! Core modules for TELIOS

pub mod auto_route;
pub mod bootstrap;
pub mod conversation;
pub mod cycler;
pub mod gate;
pub mod intent;
pub mod scoring;
pub mod screen;
pub mod session;
pub mod timer;

pub use auto_route::{AutoRouteCheck, AutoRouteScheduler};
pub use bootstrap::BootstrapOverrides;
pub use conversation::{ConversationController, MentorScript, SubmitOutcome};
pub use cycler::{CyclerState, ResponseBank, ResponseVariantCycler};
pub use gate::GateStateMachine;
pub use intent::IntentClassifier;
pub use scoring::ScoringEngine;
pub use screen::ScreenStateMachine;
pub use session::Session;
pub use timer::{to_delta, Clock, DeferredTask, ManualClock, Scheduler, SystemClock, TaskToken, TimerQueue};
