use std::time::Duration;

use chrono::Local;
use tracing::{error, info, warn};

use crate::detector;
use crate::models::AggregateSnapshot;
use crate::notify::Notifier;
use crate::scraper::AggregateScraper;
use crate::utils::error::Result;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// What happened in one polling cycle. Failures are values, not unwound
/// exceptions, so the loop's swallow-and-continue policy is visible and
/// testable without a real network fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A notable change was found and the notification was delivered.
    Notified,
    /// A notable change was found but delivery failed; the baseline still
    /// advances.
    NotifyFailed,
    /// Nothing new; the baseline is untouched.
    NoChange,
    /// The scrape failed; the baseline is untouched.
    FetchFailed,
}

/// Drives the watch forever: fetch, diff, maybe notify, sleep.
///
/// The baseline snapshot is owned here exclusively and replaced wholesale,
/// never merged. Past initialization no cycle failure terminates the
/// process.
pub struct PollLoop {
    scraper: AggregateScraper,
    notifier: Box<dyn Notifier>,
    subject: String,
    interval: Duration,
    baseline: AggregateSnapshot,
}

impl PollLoop {
    /// Establishes the initial baseline with one full scrape. With no prior
    /// baseline to fall back to, a failure here propagates and aborts
    /// startup.
    pub async fn initialize(
        scraper: AggregateScraper,
        notifier: Box<dyn Notifier>,
        subject: String,
        interval: Duration,
    ) -> Result<Self> {
        let baseline = scraper.fetch_all().await?;
        Ok(Self {
            scraper,
            notifier,
            subject,
            interval,
            baseline,
        })
    }

    pub fn baseline(&self) -> &AggregateSnapshot {
        &self.baseline
    }

    /// Runs one cycle: scrape, compare against the baseline, notify when
    /// notable. Every outcome is reported with a timestamp.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let latest = match self.scraper.fetch_all().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("Cycle failed: {}. Time: {}", err, Self::now());
                return CycleOutcome::FetchFailed;
            }
        };

        if !detector::is_notable(&self.baseline, &latest) {
            info!("Nothing new. Time: {}", Self::now());
            return CycleOutcome::NoChange;
        }

        let outcome = match self.notifier.notify(&self.subject, &latest).await {
            Ok(()) => {
                info!("NEW PRODUCTS ALERT! Notification sent. Time: {}", Self::now());
                CycleOutcome::Notified
            }
            Err(err) => {
                warn!("Notification delivery failed: {}. Time: {}", err, Self::now());
                CycleOutcome::NotifyFailed
            }
        };

        // Once a change is notable the baseline advances, delivered or not;
        // the alternative would re-alert on the same products every cycle.
        self.baseline = latest;
        outcome
    }

    /// Runs until the process is killed. No retry cap, no backoff: a cycle
    /// failure is handled the same regardless of cause or streak.
    pub async fn run(mut self) {
        loop {
            let _ = self.run_cycle().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    fn now() -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}
