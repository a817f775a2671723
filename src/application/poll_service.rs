// Polling service - The fetch/render/reschedule cycle behind every demo page
use crate::application::chart_renderer::{self, ChartSpec};
use crate::application::demo_repository::{DataQuery, DemoDataRepository};
use crate::domain::chart::ChartTable;
use crate::domain::page::{PageParameters, SimulatedClock};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Where rendered tables end up. Production hands them to the live page
/// surface; tests substitute a recorder.
pub trait PlottingSurface: Send + Sync {
    fn draw(&self, table: ChartTable);

    /// Called once if the polling chain stops for good.
    fn report_halt(&self, _error: &str) {}
}

/// What to do when a cycle's fetch fails. `Halt` stops the chain after the
/// first failure; `Retry` spends a bounded attempt budget with a fixed
/// backoff before giving up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailurePolicy {
    Halt,
    Retry {
        max_attempts: u32,
        backoff_seconds: u64,
    },
}

/// One demo page's polling session. Owns its parameters for the whole
/// session and runs as a single task, so consecutive cycles can never
/// overlap: the next fetch starts only after the current cycle has
/// rendered and the refresh delay has elapsed.
pub struct PagePoller {
    demo: String,
    params: PageParameters,
    clock: Option<SimulatedClock>,
    charts: Vec<ChartSpec>,
    repository: Arc<dyn DemoDataRepository>,
    surface: Arc<dyn PlottingSurface>,
    policy: FailurePolicy,
}

impl PagePoller {
    pub fn new(
        demo: &str,
        params: PageParameters,
        charts: Vec<ChartSpec>,
        repository: Arc<dyn DemoDataRepository>,
        surface: Arc<dyn PlottingSurface>,
        policy: FailurePolicy,
        now_ms: i64,
    ) -> Self {
        let clock = params.simulated_clock(now_ms);
        Self {
            demo: demo.to_string(),
            params,
            clock,
            charts,
            repository,
            surface,
            policy,
        }
    }

    /// Drive cycles until the shutdown signal fires or the failure policy
    /// stops the chain.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let refresh = Duration::from_secs(self.params.refresh_seconds);
        let mut failures: u32 = 0;

        loop {
            match self.run_cycle().await {
                Ok(()) => {
                    failures = 0;
                    if !sleep_or_shutdown(refresh, &mut shutdown).await {
                        tracing::debug!("poller for {} shut down", self.demo);
                        return;
                    }
                }
                Err(error) => match self.policy {
                    FailurePolicy::Halt => {
                        tracing::warn!("poller for {} halted: {:#}", self.demo, error);
                        self.surface.report_halt(&format!("{error:#}"));
                        return;
                    }
                    FailurePolicy::Retry {
                        max_attempts,
                        backoff_seconds,
                    } => {
                        failures += 1;
                        if failures >= max_attempts {
                            tracing::error!(
                                "poller for {} halted after {} failed attempts: {:#}",
                                self.demo,
                                failures,
                                error
                            );
                            self.surface.report_halt(&format!("{error:#}"));
                            return;
                        }
                        tracing::warn!(
                            "poller for {} fetch failed (attempt {}), retrying in {}s: {:#}",
                            self.demo,
                            failures,
                            backoff_seconds,
                            error
                        );
                        if !sleep_or_shutdown(
                            Duration::from_secs(backoff_seconds),
                            &mut shutdown,
                        )
                        .await
                        {
                            return;
                        }
                    }
                },
            }
        }
    }

    /// One fetch/render pass. The simulated clock moves forward only after
    /// every chart of a successful cycle has been handed off.
    async fn run_cycle(&mut self) -> anyhow::Result<()> {
        let query = DataQuery::from_params(&self.params, self.clock.as_ref());
        let data = self.repository.fetch_data_points(&self.demo, &query).await?;

        for spec in &self.charts {
            self.surface.draw(chart_renderer::render(&data, spec));
        }

        if let Some(clock) = &mut self.clock {
            clock.advance();
        }

        Ok(())
    }
}

/// Returns false once the shutdown signal fires (or its sender is gone).
async fn sleep_or_shutdown(delay: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = shutdown.changed() => false,
    }
}

/// Production plotting surface: keeps the latest table per container for
/// snapshot requests and fans every redraw out to live subscribers.
pub struct LiveCharts {
    demo: String,
    charts: RwLock<Vec<ChartTable>>,
    halted: RwLock<Option<String>>,
    events: broadcast::Sender<ChartTable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub demo: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub charts: Vec<ChartTable>,
}

impl LiveCharts {
    pub fn new(demo: &str) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            demo: demo.to_string(),
            charts: RwLock::new(Vec::new()),
            halted: RwLock::new(None),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChartTable> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let halted = self.halted.read().unwrap().clone();
        PageSnapshot {
            demo: self.demo.clone(),
            status: if halted.is_some() { "halted" } else { "ok" },
            error: halted,
            charts: self.charts.read().unwrap().clone(),
        }
    }
}

impl PlottingSurface for LiveCharts {
    fn draw(&self, table: ChartTable) {
        {
            let mut charts = self.charts.write().unwrap();
            match charts.iter_mut().find(|c| c.container == table.container) {
                Some(slot) => *slot = table.clone(),
                None => charts.push(table.clone()),
            }
        }
        // Nobody listening is fine; snapshots still update.
        let _ = self.events.send(table);
    }

    fn report_halt(&self, error: &str) {
        *self.halted.write().unwrap() = Some(error.to_string());
    }
}
