//! Daily reminder to fill in the day. The reminder runs as its own long-lived process,
//! [ReminderModule] is its event loop.

use anyhow::Result;
use notifier::{DesktopNotifier, Notifier};
use schedule::{Reminder, DAILY_REMINDER};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::utils::clock::{Clock, DefaultClock};

pub mod args;
pub mod notifier;
pub mod schedule;
pub mod shutdown;

/// Represents the starting point for the reminder process
pub async fn start_reminder() -> Result<()> {
    let shutdown_token = CancellationToken::new();

    let module = create_reminder(
        Box::new(DesktopNotifier),
        &shutdown_token,
        DefaultClock,
        DAILY_REMINDER,
    );

    let (_, result) = tokio::join!(shutdown::detect_shutdown(shutdown_token.clone()), async {
        let result = module.run().await;
        // Lets the shutdown detection finish as well
        shutdown_token.cancel();
        result
    });

    if let Err(e) = &result {
        error!("Reminder module got an error {e:?}");
    }
    result
}

fn create_reminder(
    notifier: Box<dyn Notifier>,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
    reminder: Reminder,
) -> ReminderModule {
    ReminderModule::new(notifier, shutdown_token.clone(), Box::new(clock), reminder)
}

pub struct ReminderModule {
    notifier: Box<dyn Notifier>,
    shutdown: CancellationToken,
    time_provider: Box<dyn Clock>,
    reminder: Reminder,
}

impl ReminderModule {
    pub fn new(
        notifier: Box<dyn Notifier>,
        shutdown: CancellationToken,
        time_provider: Box<dyn Clock>,
        reminder: Reminder,
    ) -> Self {
        Self {
            notifier,
            shutdown,
            time_provider,
            reminder,
        }
    }

    /// Delivers the reminder once. Failures are only logged, the next attempt is the next day.
    pub async fn deliver(&self) {
        match self.notifier.notify(&self.reminder).await {
            Ok(_) => info!("Sent reminder {}", self.reminder.identifier),
            Err(e) => error!("Failed to send reminder {}: {e:?}", self.reminder.identifier),
        }
    }

    /// Executes the reminder event loop until shutdown.
    pub async fn run(self) -> Result<()> {
        loop {
            let now = self.time_provider.time();
            let next = self.reminder.next_after(now);
            info!("Next reminder at {next}");
            let wait = (next - now).to_std()?;

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    return Ok(())
                }
                _ = self.time_provider.sleep(wait) => ()
            }

            self.deliver().await;
        }
    }
}

#[cfg(test)]
mod reminder_tests {
    use std::time::Duration;

    use anyhow::{anyhow, Result};
    use chrono::{TimeZone, Utc};
    use tokio_util::sync::CancellationToken;

    use crate::{
        reminder::{create_reminder, notifier::MockNotifier, schedule::DAILY_REMINDER},
        utils::{clock::TestClock, logging::TEST_LOGGING},
    };

    /// Two seconds before 17:00 at UTC+05:30
    fn test_clock() -> TestClock {
        TestClock::at(Utc.with_ymd_and_hms(2024, 10, 23, 11, 29, 58).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_fires_once_a_day() -> Result<()> {
        *TEST_LOGGING;
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|reminder| reminder.identifier == "AttendanceReminder")
            .times(2)
            .returning(|_| Ok(()));

        let shutdown_token = CancellationToken::new();
        let module = create_reminder(
            Box::new(notifier),
            &shutdown_token,
            test_clock(),
            DAILY_REMINDER,
        );

        let (_, result) = tokio::join!(
            async {
                // Past the reminder of today and tomorrow, but not the one after
                tokio::time::sleep(Duration::from_secs(60 * 60 * 30)).await;
                shutdown_token.cancel()
            },
            module.run(),
        );
        result
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reminder_keeps_running() -> Result<()> {
        *TEST_LOGGING;
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(anyhow!("no notification daemon")));

        let shutdown_token = CancellationToken::new();
        let module = create_reminder(
            Box::new(notifier),
            &shutdown_token,
            test_clock(),
            DAILY_REMINDER,
        );

        let (_, result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                shutdown_token.cancel()
            },
            module.run(),
        );
        result
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_reminder() -> Result<()> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let shutdown_token = CancellationToken::new();
        let module = create_reminder(
            Box::new(notifier),
            &shutdown_token,
            test_clock(),
            DAILY_REMINDER,
        );
        shutdown_token.cancel();
        module.run().await
    }
}
