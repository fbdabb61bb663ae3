//! Reminder scheduling: a pending set of single-shot reminders, a poll loop that
//! fires them when the wall clock reaches their minute, and the notifier seam
//! that carries each alert out to connected clients.

pub mod notifier;
pub mod scheduler;
pub mod worker;

pub use notifier::{AlertStyle, BroadcastNotifier, Notifier};
pub use scheduler::{ReminderError, ReminderScheduler};
pub use worker::{Clock, LocalClock, ReminderWorker};
