use std::sync::Arc;
use tokio::sync::Mutex;

use super::notifier::Notifier;
use crate::error::AppError;
use crate::models::reminder::{NotificationPermission, Reminder, ReminderTime, MAX_MESSAGE_LEN};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("Enter both time and message")]
    MissingField,

    #[error("{0}")]
    InvalidTime(String),

    #[error("Reminder message must be at most {} characters", MAX_MESSAGE_LEN)]
    MessageTooLong,
}

impl From<ReminderError> for AppError {
    fn from(e: ReminderError) -> Self {
        AppError::Validation(e.to_string())
    }
}

struct PendingReminder {
    seq: u64,
    reminder: Reminder,
}

#[derive(Default)]
struct SchedulerState {
    pending: Vec<PendingReminder>,
    next_seq: u64,
    permission: NotificationPermission,
}

/// Reminders found due by [`ReminderScheduler::match_due`], not yet taken.
#[derive(Debug)]
pub struct DueReminders {
    seqs: Vec<u64>,
}

impl DueReminders {
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }
}

/// In-memory set of single-shot reminders.
///
/// Every mutation and both halves of a poll tick go through one mutex. A tick
/// first matches, then takes; only reminders still pending at take time fire,
/// so a `clear()` that lands in between always wins.
#[derive(Clone, Default)]
pub struct ReminderScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, time: &str, message: &str) -> Result<Reminder, ReminderError> {
        let time = time.trim();
        let message = message.trim();
        if time.is_empty() || message.is_empty() {
            return Err(ReminderError::MissingField);
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ReminderError::MessageTooLong);
        }
        let time: ReminderTime = time.parse().map_err(ReminderError::InvalidTime)?;

        let reminder = Reminder {
            time,
            message: message.to_string(),
        };

        let mut state = self.state.lock().await;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(PendingReminder {
            seq,
            reminder: reminder.clone(),
        });

        tracing::debug!(time = %reminder.time, pending = state.pending.len(), "Reminder added");
        Ok(reminder)
    }

    pub async fn clear(&self) -> usize {
        let mut state = self.state.lock().await;
        let cleared = state.pending.len();
        state.pending.clear();
        tracing::debug!(cleared = cleared, "Reminders cleared");
        cleared
    }

    /// Pending reminders in the order they were added.
    pub async fn pending(&self) -> Vec<Reminder> {
        let state = self.state.lock().await;
        state.pending.iter().map(|p| p.reminder.clone()).collect()
    }

    pub async fn permission(&self) -> NotificationPermission {
        self.state.lock().await.permission
    }

    pub async fn set_permission(&self, permission: NotificationPermission) {
        self.state.lock().await.permission = permission;
    }

    /// First half of a tick: which pending reminders are due at `now`.
    pub async fn match_due(&self, now: ReminderTime) -> DueReminders {
        let state = self.state.lock().await;
        let seqs = state
            .pending
            .iter()
            .filter(|p| p.reminder.time == now)
            .map(|p| p.seq)
            .collect();
        DueReminders { seqs }
    }

    /// Second half of a tick: remove the matched reminders that are still
    /// pending and return them. Anything cleared in the meantime is gone.
    pub async fn take(&self, due: DueReminders) -> Vec<Reminder> {
        if due.is_empty() {
            return Vec::new();
        }

        let mut state = self.state.lock().await;
        let mut fired = Vec::with_capacity(due.len());
        let mut remaining = Vec::with_capacity(state.pending.len());
        for pending in state.pending.drain(..) {
            if due.seqs.contains(&pending.seq) {
                fired.push(pending.reminder);
            } else {
                remaining.push(pending);
            }
        }
        state.pending = remaining;
        fired
    }

    /// One poll tick: fire and discard every reminder due at `now`.
    pub async fn tick(&self, now: ReminderTime, notifier: &dyn Notifier) -> usize {
        let due = self.match_due(now).await;
        let fired = self.take(due).await;
        if fired.is_empty() {
            return 0;
        }

        let permission = self.permission().await;
        for reminder in &fired {
            tracing::info!(time = %reminder.time, "Reminder fired");
            notifier.notify(reminder, permission);
        }
        fired.len()
    }
}
