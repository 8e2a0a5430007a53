//! Session: the single owner of flow state
//!
//! Every entry point runs to completion on `&mut self`. Rejected requests
//! are logged at debug level and leave the state untouched; entry points
//! report whether anything changed.
//!
//! Pending deferred tasks are dropped whenever the gate or the screen
//! changes, or the chat is cleared.

use chrono::{DateTime, Utc};

use crate::config::FlowConfig;
use crate::core::auto_route::AutoRouteScheduler;
use crate::core::bootstrap::BootstrapOverrides;
use crate::core::conversation::{ConversationController, MentorScript};
use crate::core::cycler::ResponseBank;
use crate::core::gate::GateStateMachine;
use crate::core::scoring::ScoringEngine;
use crate::core::screen::ScreenStateMachine;
use crate::core::timer::{to_delta, Clock, DeferredTask, Scheduler, SystemClock, TimerQueue};
use crate::error::TransitionError;
use crate::types::{
    AnswerSequence, CategoryTag, ConversationLog, GateEvent, GateState, Question, ReasonCode,
    ScoreResult, ScreenState, StateOutput, Transition, UserProfile, QUESTIONS,
};

/// Flow state for one user
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    clock: C,
    config: FlowConfig,
    gate: GateStateMachine,
    screens: ScreenStateMachine,
    scoring: ScoringEngine,
    answers: AnswerSequence,
    score: Option<ScoreResult>,
    profile: Option<UserProfile>,
    chat: ConversationController,
    auto_route: AutoRouteScheduler,
    timers: TimerQueue,
    /// Latest typing or send, fed to the auto-route check
    last_interaction: Option<DateTime<Utc>>,
    reason: ReasonCode,
}

impl Session<SystemClock> {
    /// Session on the wall clock with the standard content
    pub fn new(config: FlowConfig) -> Self {
        Self::with_clock(SystemClock, config)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(clock: C, config: FlowConfig) -> Self {
        Self::with_content(clock, config, ResponseBank::standard(), MentorScript::standard())
    }

    /// Session with a custom reply bank and mentor script
    pub fn with_content(clock: C, config: FlowConfig, bank: ResponseBank, script: MentorScript) -> Self {
        let script = script.with_high_clarity_threshold(config.high_clarity_threshold);
        Self {
            clock,
            auto_route: AutoRouteScheduler::new(&config),
            config,
            gate: GateStateMachine::new(),
            screens: ScreenStateMachine::new(),
            scoring: ScoringEngine::new(),
            answers: AnswerSequence::new(),
            score: None,
            profile: None,
            chat: ConversationController::new(bank, script),
            timers: TimerQueue::new(),
            last_interaction: None,
            reason: ReasonCode::R000_INITIAL,
        }
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    pub fn gate(&self) -> GateState {
        self.gate.state()
    }

    pub fn screen(&self) -> ScreenState {
        self.screens.state()
    }

    pub fn answers(&self) -> &AnswerSequence {
        &self.answers
    }

    /// Question the assessment screen should show
    pub fn current_question(&self) -> Option<&'static Question> {
        self.answers.current_question().map(|i| &QUESTIONS[i])
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        self.score.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn messages(&self) -> &ConversationLog {
        self.chat.log()
    }

    pub fn conversation(&self) -> &ConversationController {
        &self.chat
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn last_reason(&self) -> ReasonCode {
        self.reason
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.pending()
    }

    /// When the driver should call [`Session::run_due_tasks`] next
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_due()
    }

    pub fn snapshot(&self) -> StateOutput {
        StateOutput {
            timestamp: self.clock.now(),
            gate: self.gate(),
            screen: self.screen(),
            answered: self.answers.len(),
            progress: self.answers.progress_percent(),
            current_question: self.answers.current_question(),
            score: self.score,
            band: self.score.map(|s| s.band()),
            profile: self.profile,
            messages: self.chat.log().messages().to_vec(),
            pending_tasks: self.timers.pending(),
            reason: self.reason,
        }
    }

    // =========================================================================
    // Gate
    // =========================================================================

    pub fn accept_oath(&mut self) -> bool {
        self.gate_event(GateEvent::Accept)
    }

    pub fn decline_oath(&mut self) -> bool {
        self.gate_event(GateEvent::Decline)
    }

    pub fn skip_gates(&mut self) -> bool {
        self.gate_event(GateEvent::Skip)
    }

    pub fn gate_event(&mut self, event: GateEvent) -> bool {
        match self.gate.transition(event) {
            Ok(t) => {
                self.on_gate_changed(t);
                true
            }
            Err(e) => ignored(e),
        }
    }

    // =========================================================================
    // Assessment
    // =========================================================================

    /// Landing → assessment with a fresh answer sequence
    pub fn start_assessment(&mut self) -> bool {
        self.request_screen(ScreenState::Assessment)
    }

    /// Record one answer. The tenth answer scores the sequence and shows results.
    pub fn submit_answer(&mut self, tag: CategoryTag) -> bool {
        if !self.gate.is_unlocked() {
            return ignored(TransitionError::GateLocked {
                gate: self.gate(),
                target: ScreenState::Assessment,
            });
        }
        if self.screen() != ScreenState::Assessment {
            return ignored(TransitionError::NotAssessing(self.screen()));
        }
        if !self.answers.push(tag) {
            return ignored(TransitionError::AssessmentComplete(self.answers.len()));
        }
        tracing::debug!(answered = self.answers.len(), %tag, "answer recorded");

        if self.answers.is_complete() {
            self.score = self.scoring.score(&self.answers);
            if let Some(score) = &self.score {
                tracing::info!(clarity = score.clarity, primary = %score.primary, "assessment scored");
            }
            self.change_screen(ScreenState::Results, ReasonCode::S002_ASSESSMENT_COMPLETE);
        }
        true
    }

    /// Answer the current question by option position (0..4)
    pub fn answer_option(&mut self, choice: usize) -> bool {
        match self.current_question().and_then(|q| q.tag_for(choice)) {
            Some(tag) => self.submit_answer(tag),
            None => false,
        }
    }

    /// Results → landing with answers cleared
    pub fn retake(&mut self) -> bool {
        if self.screen() != ScreenState::Results {
            return ignored(TransitionError::NotOnResults(self.screen()));
        }
        self.answers.clear();
        self.change_screen(ScreenState::Landing, ReasonCode::S006_RESTART)
            .is_some()
    }

    // =========================================================================
    // Mentor chat
    // =========================================================================

    /// Snapshot the profile from the latest score and open the chat
    pub fn enter_conversation(&mut self) -> bool {
        let Some(score) = self.score else {
            return ignored(TransitionError::MissingProfile(ScreenState::Conversation));
        };
        if self.screen() == ScreenState::Conversation {
            return ignored(TransitionError::SameScreen(ScreenState::Conversation));
        }
        if !self.gate.is_unlocked() {
            return ignored(TransitionError::GateLocked {
                gate: self.gate(),
                target: ScreenState::Conversation,
            });
        }
        self.profile = Some(UserProfile::from_score(&score));
        self.change_screen(ScreenState::Conversation, ReasonCode::S003_CONVERSATION_ENTERED)
            .is_some()
    }

    /// Send a chat message. Blank text is a no-op.
    pub fn submit_message(&mut self, text: &str) -> bool {
        if self.screen() != ScreenState::Conversation {
            return ignored(TransitionError::NotInConversation(self.screen()));
        }
        let now = self.clock.now();
        let Some(outcome) = self.chat.submit(text, now) else {
            return ignored(TransitionError::EmptyMessage);
        };
        self.last_interaction = Some(now);
        tracing::debug!(intent = %outcome.intent, "mentor replied");

        if outcome.wants_navigation() {
            let due = now + to_delta(self.config.confirmation_delay);
            self.timers.schedule(due, DeferredTask::NavigateConfirmation);
        }
        true
    }

    /// Keystroke in the chat input; only refreshes the inactivity clock.
    /// Ignored outside the conversation.
    pub fn on_user_typing(&mut self) -> bool {
        if self.screen() != ScreenState::Conversation {
            return ignored(TransitionError::NotInConversation(self.screen()));
        }
        self.last_interaction = Some(self.clock.now());
        true
    }

    /// Empty the chat log. Rotation counters are kept.
    pub fn clear_chat(&mut self) -> bool {
        let had_messages = !self.chat.log().is_empty();
        self.chat.clear();
        self.invalidate_timers("chat cleared");
        had_messages
    }

    /// Back to landing with answers and chat cleared
    pub fn restart(&mut self) -> bool {
        self.answers.clear();
        self.chat.clear();
        self.invalidate_timers("restart");
        self.change_screen(ScreenState::Landing, ReasonCode::S006_RESTART);
        true
    }

    /// Chat shortcut to the main interface
    pub fn go_home(&mut self) -> bool {
        let unlocked = self.force_unlock();
        self.change_screen(ScreenState::Landing, ReasonCode::S001_SCREEN_REQUESTED)
            .is_some()
            || unlocked
    }

    /// Chat shortcut back into the assessment (answers are reset)
    pub fn revisit_assessment(&mut self) -> bool {
        self.request_screen(ScreenState::Assessment)
    }

    /// Chat shortcut to the results screen
    pub fn revisit_results(&mut self) -> bool {
        self.request_screen(ScreenState::Results)
    }

    /// Screen request with the data preconditions each screen needs
    pub fn request_screen(&mut self, target: ScreenState) -> bool {
        if target == self.screen() {
            return ignored(TransitionError::SameScreen(target));
        }
        if target.requires_unlocked_gate() && !self.gate.is_unlocked() {
            return ignored(TransitionError::GateLocked {
                gate: self.gate(),
                target,
            });
        }
        match target {
            ScreenState::Assessment => self.answers.clear(),
            ScreenState::Results | ScreenState::Conversation if self.lacks_data_for(target) => {
                return ignored(TransitionError::MissingProfile(target));
            }
            _ => {}
        }
        self.change_screen(target, ReasonCode::S001_SCREEN_REQUESTED)
            .is_some()
    }

    // =========================================================================
    // Deferred tasks
    // =========================================================================

    /// Run every task due by now. Returns how many ran.
    pub fn run_due_tasks(&mut self) -> usize {
        let mut ran = 0;
        // One at a time: a task that changes the screen cancels the rest
        while let Some((token, task)) = self.timers.pop_due(self.clock.now()) {
            tracing::debug!(?token, ?task, "deferred task due");
            self.fire(task);
            ran += 1;
        }
        ran
    }

    fn fire(&mut self, task: DeferredTask) {
        let now = self.clock.now();
        match task {
            DeferredTask::NavigateConfirmation => {
                self.chat.confirm_navigation(now);
                self.force_unlock();
                self.change_screen(ScreenState::Landing, ReasonCode::S004_NAVIGATE_INTENT);
            }
            DeferredTask::AutoRoute(check) => {
                if check.should_route(now, self.last_interaction, self.gate(), self.screen()) {
                    tracing::info!("auto-routing idle user to landing");
                    self.force_unlock();
                    self.change_screen(ScreenState::Landing, ReasonCode::S005_AUTO_ROUTE);
                } else {
                    tracing::debug!("auto-route check passed without action");
                }
            }
        }
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Apply startup overrides. Call before the first render.
    ///
    /// The gate is forced as given. The screen is forced without the gate
    /// check, but results and conversation still need a score / profile.
    pub fn apply_bootstrap(&mut self, overrides: &BootstrapOverrides) {
        if let Some(gate) = overrides.gate() {
            if let Some(t) = self.gate.force(gate) {
                self.on_gate_changed(t);
            }
        }
        let Some(screen) = overrides.screen() else {
            return;
        };
        if self.lacks_data_for(screen) {
            ignored(TransitionError::MissingProfile(screen));
            return;
        }
        if screen == ScreenState::Assessment {
            self.answers.clear();
        }
        if let Some(t) = self.screens.request(screen, ReasonCode::S007_BOOTSTRAP) {
            self.on_screen_changed(t);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Results need a score, the conversation needs a profile
    fn lacks_data_for(&self, screen: ScreenState) -> bool {
        match screen {
            ScreenState::Results => self.score.is_none(),
            ScreenState::Conversation => self.profile.is_none(),
            _ => false,
        }
    }

    fn force_unlock(&mut self) -> bool {
        match self.gate.force_unlock() {
            Some(t) => {
                self.on_gate_changed(t);
                true
            }
            None => false,
        }
    }

    fn change_screen(&mut self, target: ScreenState, reason: ReasonCode) -> Option<Transition<ScreenState>> {
        if target.requires_unlocked_gate() && !self.gate.is_unlocked() {
            ignored(TransitionError::GateLocked {
                gate: self.gate(),
                target,
            });
            return None;
        }
        let t = self.screens.request(target, reason)?;
        self.on_screen_changed(t);
        Some(t)
    }

    fn on_gate_changed(&mut self, t: Transition<GateState>) {
        tracing::info!(from = %t.from, to = %t.to, reason = t.reason.code(), "gate transition");
        self.reason = t.reason;
        self.invalidate_timers("gate changed");
    }

    fn on_screen_changed(&mut self, t: Transition<ScreenState>) {
        tracing::info!(from = %t.from, to = %t.to, reason = t.reason.code(), "screen transition");
        self.reason = t.reason;
        self.invalidate_timers("screen changed");
        if t.entered_conversation() {
            self.on_conversation_entered();
        }
    }

    /// Seed the chat and, on that same occasion, arm the auto-route check
    fn on_conversation_entered(&mut self) {
        let Some(profile) = self.profile else {
            return;
        };
        let now = self.clock.now();
        if !self.chat.seed(&profile, now) {
            return;
        }
        if let Some(check) = self.auto_route.arm(Some(&profile), now) {
            tracing::debug!(due = %check.due, "auto-route armed");
            self.timers.schedule(check.due, DeferredTask::AutoRoute(check));
        }
    }

    fn invalidate_timers(&mut self, why: &str) {
        let dropped = self.timers.cancel_all();
        if dropped > 0 {
            tracing::debug!(dropped, why, "pending tasks cancelled");
        }
    }
}

/// Log a rejected request and report "nothing changed"
fn ignored(err: TransitionError) -> bool {
    tracing::debug!("ignored: {err}");
    false
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timer::ManualClock;

    fn session() -> (Session<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        (Session::with_clock(clock.clone(), FlowConfig::default()), clock)
    }

    fn answer_all(session: &mut Session<ManualClock>, tags: &str) {
        for tag in CategoryTag::parse_many(tags).unwrap() {
            session.submit_answer(tag);
        }
    }

    #[test]
    fn test_screens_locked_until_gate_unlocks() {
        let (mut s, _) = session();
        assert!(!s.start_assessment());
        assert_eq!(s.screen(), ScreenState::Landing);

        assert!(s.accept_oath());
        assert!(!s.start_assessment());
        assert!(s.accept_oath());
        assert!(s.start_assessment());
        assert_eq!(s.screen(), ScreenState::Assessment);
    }

    #[test]
    fn test_tenth_answer_scores_and_shows_results() {
        let (mut s, _) = session();
        s.skip_gates();
        s.start_assessment();
        answer_all(&mut s, "AAAAAAAAA");
        assert_eq!(s.screen(), ScreenState::Assessment);
        assert!(s.score().is_none());

        assert!(s.submit_answer(CategoryTag::A));
        assert_eq!(s.screen(), ScreenState::Results);
        assert_eq!(s.score().map(|r| r.clarity), Some(100));
        assert_eq!(s.last_reason(), ReasonCode::S002_ASSESSMENT_COMPLETE);

        // Results screen ignores further answers
        assert!(!s.submit_answer(CategoryTag::B));
        assert_eq!(s.answers().len(), 10);
    }

    #[test]
    fn test_answer_option_uses_current_question() {
        let (mut s, _) = session();
        s.skip_gates();
        s.start_assessment();
        assert!(s.answer_option(3));
        assert_eq!(s.answers().get(0), QUESTIONS[0].tag_for(3));
        assert!(!s.answer_option(4));
    }

    #[test]
    fn test_conversation_needs_score() {
        let (mut s, _) = session();
        s.skip_gates();
        assert!(!s.enter_conversation());
        assert!(!s.request_screen(ScreenState::Results));
        assert_eq!(s.screen(), ScreenState::Landing);
    }

    #[test]
    fn test_blank_message_is_noop() {
        let (mut s, _) = session();
        s.skip_gates();
        s.start_assessment();
        answer_all(&mut s, "DDDDDDDDDD");
        s.enter_conversation();
        let seeded = s.messages().len();

        assert!(!s.submit_message("   "));
        assert_eq!(s.messages().len(), seeded);
    }

    #[test]
    fn test_low_clarity_does_not_arm() {
        let (mut s, clock) = session();
        s.skip_gates();
        s.start_assessment();
        answer_all(&mut s, "DDDDDDDDDD");
        s.enter_conversation();
        assert_eq!(s.pending_tasks(), 0);

        clock.advance_ms(5000);
        assert_eq!(s.run_due_tasks(), 0);
        assert_eq!(s.screen(), ScreenState::Conversation);
    }

    #[test]
    fn test_retake_only_from_results() {
        let (mut s, _) = session();
        s.skip_gates();
        s.start_assessment();
        answer_all(&mut s, "ABCD");
        s.restart();
        assert!(s.start_assessment());
        answer_all(&mut s, "AB");

        // Assessment screen: nothing changes, answers survive
        assert!(!s.retake());
        assert_eq!(s.answers().len(), 2);

        answer_all(&mut s, "AAAAAAAA");
        assert_eq!(s.screen(), ScreenState::Results);
        assert!(s.retake());
        assert!(s.answers().is_empty());

        // Already on landing
        assert!(!s.retake());
    }

    #[test]
    fn test_typing_outside_chat_is_ignored() {
        let (mut s, clock) = session();
        s.skip_gates();
        s.start_assessment();
        answer_all(&mut s, "AAAAAAABBC");
        assert!(!s.on_user_typing());

        s.enter_conversation();
        clock.advance_ms(1200);
        assert!(s.on_user_typing());
        clock.advance_ms(300);
        assert_eq!(s.run_due_tasks(), 1);
        assert_eq!(s.screen(), ScreenState::Conversation);
    }

    #[test]
    fn test_bootstrap_forces_gate_and_screen() {
        let (mut s, _) = session();
        s.apply_bootstrap(&BootstrapOverrides {
            stage: Some("stopped".to_string()),
            screen: Some("assessment".to_string()),
            dev: false,
        });
        assert_eq!(s.gate(), GateState::Stopped);
        assert_eq!(s.screen(), ScreenState::Assessment);
        assert_eq!(s.last_reason(), ReasonCode::S007_BOOTSTRAP);
    }
}
