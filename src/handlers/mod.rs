pub mod daily_logs;
pub mod health;
pub mod meals;
pub mod motivation;
pub mod reminders;
pub mod settings;
pub mod workouts;
pub mod ws;

use chrono::{Local, NaiveDate};

/// The profile's calendar day, in the server's local time zone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
