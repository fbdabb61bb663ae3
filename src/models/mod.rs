pub mod daily_log;
pub mod reminder;
pub mod settings;
