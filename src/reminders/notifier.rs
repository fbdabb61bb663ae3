use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::Config;
use crate::models::reminder::{BannerTiming, NotificationPermission, Reminder, ReminderNotification};

pub const ALERT_TITLE: &str = "FitFlow Reminder";
pub const WINDOW_TITLE: &str = "🔔 New Notification!";

/// Receives every reminder the scheduler fires.
pub trait Notifier: Send + Sync {
    fn notify(&self, reminder: &Reminder, permission: NotificationPermission);
}

/// How a fired reminder is presented to the user.
#[derive(Debug, Clone)]
pub struct AlertStyle {
    pub timing: BannerTiming,
    pub sound_url: String,
}

impl AlertStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timing: BannerTiming {
                fade_after_ms: config.banner_fade_secs.saturating_mul(1000),
                remove_after_ms: config.banner_remove_secs.saturating_mul(1000),
                title_revert_after_ms: config.title_revert_secs.saturating_mul(1000),
            },
            sound_url: config.reminder_sound_url.clone(),
        }
    }

    /// The in-app banner always shows; the OS-level alert only with permission.
    pub fn notification_for(
        &self,
        reminder: &Reminder,
        permission: NotificationPermission,
    ) -> ReminderNotification {
        ReminderNotification {
            id: Uuid::new_v4(),
            title: ALERT_TITLE.to_string(),
            message: reminder.message.clone(),
            banner_text: format!("🚨 REMINDER 🚨 -> {}", reminder.message),
            window_title: WINDOW_TITLE.to_string(),
            sound_url: self.sound_url.clone(),
            system_alert: permission == NotificationPermission::Granted,
            timing: self.timing,
        }
    }
}

/// Publishes notifications on the WebSocket broadcast channel.
pub struct BroadcastNotifier {
    tx: broadcast::Sender<String>,
    style: AlertStyle,
}

impl BroadcastNotifier {
    pub fn new(tx: broadcast::Sender<String>, style: AlertStyle) -> Self {
        Self { tx, style }
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, reminder: &Reminder, permission: NotificationPermission) {
        let notification = self.style.notification_for(reminder, permission);
        let msg = serde_json::json!({
            "type": "reminder",
            "notification": &notification,
        });

        // No subscribers just means no client is open right now.
        if self.tx.send(msg.to_string()).is_err() {
            tracing::debug!(id = %notification.id, "Reminder fired with no connected clients");
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    fired: std::sync::Mutex<Vec<(Reminder, NotificationPermission)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.fired
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.message.clone())
            .collect()
    }

    pub fn permissions(&self) -> Vec<NotificationPermission> {
        self.fired.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, reminder: &Reminder, permission: NotificationPermission) {
        self.fired
            .lock()
            .unwrap()
            .push((reminder.clone(), permission));
    }
}
