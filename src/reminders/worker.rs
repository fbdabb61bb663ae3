use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::notifier::Notifier;
use super::scheduler::ReminderScheduler;
use crate::models::reminder::ReminderTime;

/// Source of the current local time of day.
pub trait Clock: Send + Sync {
    fn now(&self) -> ReminderTime;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> ReminderTime {
        ReminderTime::from_clock(chrono::Local::now().time())
    }
}

/// Background poll loop for a [`ReminderScheduler`].
///
/// The loop lives as long as this handle: `stop()` or dropping it aborts the task.
pub struct ReminderWorker {
    handle: JoinHandle<()>,
}

impl ReminderWorker {
    pub fn spawn(
        scheduler: ReminderScheduler,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let fired = scheduler.tick(clock.now(), notifier.as_ref()).await;
                if fired > 0 {
                    tracing::info!(fired = fired, "Reminder poll: notifications sent");
                }
            }
        });

        tracing::info!(period_ms = period.as_millis() as u64, "Reminder worker started");
        Self { handle }
    }

    pub fn stop(&self) {
        if self.is_running() {
            self.handle.abort();
            tracing::info!("Reminder worker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ReminderWorker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
