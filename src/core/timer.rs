//! Clock and cancelable deferred tasks
//!
//! Nothing here sleeps. Tasks carry a due time; the driver asks for the
//! next deadline, waits however it likes, then pops what is due.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::auto_route::AutoRouteCheck;

/// Current-time source
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + to_delta(by));
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Convert a std duration for date arithmetic, saturating at ~49 days
pub fn to_delta(d: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(d.as_millis().min(u32::MAX as u128) as i64)
}

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskToken(u64);

/// Work the session runs later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Append the navigate confirmation and move to landing
    NavigateConfirmation,
    /// Inactivity check for high-clarity users
    AutoRoute(AutoRouteCheck),
}

/// Deferred-task scheduler
pub trait Scheduler {
    /// Queue `task` to run at `due`
    fn schedule(&mut self, due: DateTime<Utc>, task: DeferredTask) -> TaskToken;

    /// Drop one task. Returns false when it already ran or was cancelled.
    fn cancel(&mut self, token: TaskToken) -> bool;

    /// Drop every pending task, returning how many were dropped
    fn cancel_all(&mut self) -> usize;

    /// Earliest due time, if anything is pending
    fn next_due(&self) -> Option<DateTime<Utc>>;

    /// Remove and return the earliest task due at or before `now`
    fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TaskToken, DeferredTask)>;

    fn pending(&self) -> usize;
}

/// Due-ordered task queue
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_token: u64,
    by_due: BTreeMap<(DateTime<Utc>, TaskToken), DeferredTask>,
    due_of: HashMap<TaskToken, DateTime<Utc>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, due: DateTime<Utc>, task: DeferredTask) -> TaskToken {
        let token = TaskToken(self.next_token);
        self.next_token += 1;
        self.by_due.insert((due, token), task);
        self.due_of.insert(token, due);
        token
    }

    fn cancel(&mut self, token: TaskToken) -> bool {
        match self.due_of.remove(&token) {
            Some(due) => self.by_due.remove(&(due, token)).is_some(),
            None => false,
        }
    }

    fn cancel_all(&mut self) -> usize {
        let dropped = self.by_due.len();
        self.by_due.clear();
        self.due_of.clear();
        dropped
    }

    fn next_due(&self) -> Option<DateTime<Utc>> {
        self.by_due.keys().next().map(|(due, _)| *due)
    }

    fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TaskToken, DeferredTask)> {
        let (&(due, token), _) = self.by_due.iter().next()?;
        if due > now {
            return None;
        }
        let task = self.by_due.remove(&(due, token))?;
        self.due_of.remove(&token);
        Some((token, task))
    }

    fn pending(&self) -> usize {
        self.by_due.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
