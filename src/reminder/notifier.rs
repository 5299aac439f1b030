use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use super::schedule::Reminder;

/// Something able to show a reminder to the user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, reminder: &Reminder) -> Result<()>;
}

/// Prints reminders into the console. Used when the reminder is requested directly.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<()> {
        println!("{}: {}", reminder.title, reminder.body);
        Ok(())
    }
}

/// Shows reminders as desktop notifications through `notify-send`. Availability differs from
/// system to system, so a failed attempt is only reported back.
pub struct DesktopNotifier;

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<()> {
        debug!("Sending notification {}", reminder.identifier);
        let status = tokio::process::Command::new("notify-send")
            .args(["--app-name", "attendance-tracker", reminder.title, reminder.body])
            .status()
            .await?;
        if !status.success() {
            bail!("notify-send exited with {status}");
        }
        info!("Delivered {}", reminder.identifier);
        Ok(())
    }
}
