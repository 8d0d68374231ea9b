use std::future::Future;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::display::TextSink;
use crate::errors::Result;
use crate::format::{DisplayText, Translate, identity};
use crate::uptime::UptimeSource;

/// Keeps the label and detail sinks in step with the uptime source.
///
/// Nothing is written until [`start`](Self::start) and nothing after
/// [`stop`](Self::stop). Ticks run one at a time, so a slow read can delay
/// the next tick but never race it.
pub struct RefreshController<S, L, D> {
    source: S,
    label: L,
    detail: D,
    translate: Box<Translate>,
    interval: Duration,
    active: bool,
}

impl<S, L, D> RefreshController<S, L, D>
where
    S: UptimeSource,
    L: TextSink,
    D: TextSink,
{
    pub fn new(source: S, label: L, detail: D, interval: Duration) -> Self {
        Self {
            source,
            label,
            detail,
            translate: Box::new(identity),
            interval,
            active: false,
        }
    }

    #[allow(dead_code)]
    pub fn with_translation(mut self, translate: Box<Translate>) -> Self {
        self.translate = translate;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates the controller and fills both sinks right away.
    pub async fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        info!(
            source = self.source.name(),
            label = %self.label.describe(),
            detail = %self.detail.describe(),
            interval_secs = self.interval.as_secs(),
            "Starting uptime refresh"
        );
        if let Err(e) = self.tick().await {
            warn!(error = %e, "Initial uptime refresh failed");
        }
    }

    /// One sample, format and push cycle. A no-op once stopped.
    pub async fn tick(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        let seconds = self.source.sample().await;
        // A read that finishes after stop() must not reach the sinks.
        if !self.active {
            return Ok(());
        }

        let text = DisplayText::render(seconds.as_secs_f64(), &*self.translate);
        debug!(short = %text.short, detailed = %text.detailed, "Refreshing uptime text");

        let label_result = self.label.set_text(&text.short);
        let detail_result = self.detail.set_text(&text.detailed);
        label_result.and(detail_result)
    }

    /// Ticks every interval until `shutdown` resolves, then stops.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick is immediate and start() already covered it.
        ticker.tick().await;

        while self.active {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                result = self.tick() => {
                    if let Err(e) = result {
                        warn!(error = %e, "Uptime refresh failed, will retry next tick");
                    }
                }
            }
        }

        self.stop();
    }

    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            info!("Stopped uptime refresh");
        }
    }
}

impl<S, L, D> Drop for RefreshController<S, L, D> {
    fn drop(&mut self) {
        // Sinks are dropped after this runs, so nothing can write to them.
        self.active = false;
    }
}
