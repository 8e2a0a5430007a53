//! Integration tests for the ATLAS mentor chat
//!
//! Tests the full path: results → conversation → intents → deferred tasks

use pretty_assertions::assert_eq;

use telios::config::FlowConfig;
use telios::core::{ManualClock, Session};
use telios::types::{CategoryTag, GateState, ReasonCode, Role, ScreenState};

/// Unlocked session sitting in the chat after scoring `answers`
fn in_chat(answers: &str) -> (Session<ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let mut s = Session::with_clock(clock.clone(), FlowConfig::default());
    s.skip_gates();
    s.start_assessment();
    for tag in CategoryTag::parse_many(answers).unwrap() {
        s.submit_answer(tag);
    }
    assert!(s.enter_conversation());
    (s, clock)
}

fn texts(s: &Session<ManualClock>) -> Vec<String> {
    s.messages().messages().iter().map(|m| m.text.clone()).collect()
}

/// Clarity 88 Builder gets the assertive opening
#[test]
fn test_seed_for_high_clarity() {
    let (s, _) = in_chat("AAAAAAABBC");
    assert_eq!(s.profile().map(|p| p.clarity), Some(88));
    assert_eq!(
        texts(&s),
        vec![
            "Your clarity score: 88%. Primary: Builder.".to_string(),
            "You execute through creation. Let's get you building - start with the first small step."
                .to_string(),
            "You're ready. I'll take you to the main interface now.".to_string(),
        ]
    );
    assert_eq!(s.last_reason(), ReasonCode::S003_CONVERSATION_ENTERED);
}

/// Navigate intent: reply now, confirmation + landing after the delay
#[test]
fn test_navigate_intent_routes_home() {
    let (mut s, clock) = in_chat("DDDDDDDDDD");
    let seeded = s.messages().len();

    assert!(s.submit_message("take me to the dashboard"));
    assert_eq!(s.messages().len(), seeded + 2);
    assert_eq!(
        s.messages().last().map(|m| m.text.as_str()),
        Some("I can take you there. Want to go to the main interface now?")
    );
    assert_eq!(s.pending_tasks(), 1);

    clock.advance_ms(299);
    assert_eq!(s.run_due_tasks(), 0);
    assert_eq!(s.screen(), ScreenState::Conversation);

    clock.advance_ms(1);
    assert_eq!(s.run_due_tasks(), 1);
    assert_eq!(s.screen(), ScreenState::Landing);
    assert_eq!(s.gate(), GateState::AppUnlocked);
    assert_eq!(s.last_reason(), ReasonCode::S004_NAVIGATE_INTENT);
    assert_eq!(
        s.messages().last().map(|m| m.text.as_str()),
        Some("Taking you to the main interface. You can always come back to chat.")
    );
}

/// Idle high-clarity user is routed after the auto-route delay
#[test]
fn test_auto_route_when_idle() {
    let (mut s, clock) = in_chat("AAAAAAABBC");
    assert_eq!(s.pending_tasks(), 1);

    clock.advance_ms(1499);
    assert_eq!(s.run_due_tasks(), 0);

    clock.advance_ms(1);
    assert_eq!(s.run_due_tasks(), 1);
    assert_eq!(s.screen(), ScreenState::Landing);
    assert_eq!(s.last_reason(), ReasonCode::S005_AUTO_ROUTE);
}

/// A recent message keeps the user in the chat
#[test]
fn test_auto_route_blocked_by_recent_interaction() {
    let (mut s, clock) = in_chat("AAAAAAABBC");

    clock.advance_ms(1000);
    assert!(s.submit_message("hello"));
    clock.advance_ms(500);

    assert_eq!(s.run_due_tasks(), 1);
    assert_eq!(s.screen(), ScreenState::Conversation);
    assert_eq!(s.pending_tasks(), 0);
}

/// Typing early in the window does not count
#[test]
fn test_early_typing_does_not_block_route() {
    let (mut s, clock) = in_chat("AAAAAAABBC");

    clock.advance_ms(400);
    s.on_user_typing();
    clock.advance_ms(1100);

    assert_eq!(s.run_due_tasks(), 1);
    assert_eq!(s.screen(), ScreenState::Landing);
}

/// Leaving the chat drops the pending check
#[test]
fn test_stale_timers_are_cancelled() {
    let (mut s, clock) = in_chat("AAAAAAABBC");
    assert!(s.revisit_results());
    assert_eq!(s.pending_tasks(), 0);

    clock.advance_ms(5000);
    assert_eq!(s.run_due_tasks(), 0);
    assert_eq!(s.screen(), ScreenState::Results);
}

/// Re-entering with messages in the log neither re-seeds nor re-arms
#[test]
fn test_reentry_keeps_log_and_does_not_arm() {
    let (mut s, clock) = in_chat("AAAAAAABBC");
    s.revisit_results();
    assert!(s.enter_conversation());

    assert_eq!(s.messages().len(), 3);
    assert_eq!(s.pending_tasks(), 0);
    clock.advance_ms(5000);
    assert_eq!(s.run_due_tasks(), 0);
    assert_eq!(s.screen(), ScreenState::Conversation);
}

/// Clearing the chat keeps rotation counters and cancels the navigate task
#[test]
fn test_clear_keeps_rotation() {
    let (mut s, clock) = in_chat("DDDDDDDDDD");

    s.submit_message("I want to build");
    let first = s.messages().last().map(|m| m.text.clone());
    s.submit_message("go home");
    assert_eq!(s.pending_tasks(), 1);

    assert!(s.clear_chat());
    assert!(s.messages().is_empty());
    assert_eq!(s.pending_tasks(), 0);
    clock.advance_ms(1000);
    assert_eq!(s.run_due_tasks(), 0);
    assert_eq!(s.screen(), ScreenState::Conversation);

    s.submit_message("I want to build");
    let second = s.messages().last().map(|m| m.text.clone());
    assert_ne!(first, second);
    assert_eq!(
        second.as_deref(),
        Some("Block 45 minutes on your calendar now. What will you build in that time?")
    );
}

/// Replies cycle through every variant before repeating
#[test]
fn test_variants_cycle_per_intent() {
    let (mut s, _) = in_chat("DDDDDDDDDD");
    let mut replies = Vec::new();
    for _ in 0..4 {
        s.submit_message("I'm scared");
        replies.push(s.messages().last().map(|m| m.text.clone()).unwrap_or_default());
    }
    assert_eq!(replies[0], replies[3]);
    assert_ne!(replies[0], replies[1]);
    assert_ne!(replies[1], replies[2]);
    assert_eq!(s.messages().by_role(Role::User).count(), 4);
}

/// Chat shortcuts go home and unlock nothing extra
#[test]
fn test_go_home_shortcut() {
    let (mut s, _) = in_chat("DDDDDDDDDD");
    assert!(s.go_home());
    assert_eq!(s.screen(), ScreenState::Landing);
    assert_eq!(s.last_reason(), ReasonCode::S001_SCREEN_REQUESTED);
}

/// Revisiting the assessment from the chat starts over
#[test]
fn test_revisit_assessment_resets_answers() {
    let (mut s, _) = in_chat("DDDDDDDDDD");
    assert!(s.revisit_assessment());
    assert_eq!(s.screen(), ScreenState::Assessment);
    assert!(s.answers().is_empty());
}

/// An emptied chat shows the readiness header for the entry profile
#[test]
fn test_empty_chat_readiness_header() {
    let (mut s, _) = in_chat("AAAAAAABBC");
    assert!(!s.messages().is_empty());

    s.clear_chat();
    assert!(s.messages().is_empty());
    assert_eq!(
        s.profile().map(|p| p.readiness_prompt()),
        Some("You're ready. Execute. What's your first move?")
    );

    let (mut s, _) = in_chat("DDDDDDDDDD");
    s.clear_chat();
    assert_eq!(
        s.profile().map(|p| p.readiness_prompt()),
        Some("You're searching. What feels most unclear right now?")
    );
}
