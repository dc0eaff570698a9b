//! One snapshot check: load state, observe the trailing window, reconcile,
//! persist, alert.
//!
//! Runs are not safe to overlap for the same deployment: both state blobs
//! are read-modify-write with last writer wins. Whoever schedules the job
//! must keep it to one run at a time.

mod observe;
mod reconcile;
mod report;

pub use observe::{Observation, PartitionScan, ScanOutcome, observe_partitions, observe_window};
pub use reconcile::{Policy, Reconciliation, difference, reconcile};
pub use report::{missing_alert, new_tables_alert};

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use log::{error, info, warn};

use crate::conf::{Deployment, MonitorConfig};
use crate::core::SnapwatchError;
use crate::notify::{Alert, Notifier};
use crate::snapshot::{ObservationWindow, SnapshotLister, bootstrap_partitions, display};
use crate::state::{Baseline, StateStore};

/// Outcome of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub window: ObservationWindow,
    /// True when no baseline existed and one was built from yesterday and today.
    pub bootstrapped: bool,
    pub scans: Vec<PartitionScan>,
    pub reconciliation: Reconciliation,
    pub persist_failures: Vec<String>,
    /// Titles of alerts delivered.
    pub alerts_sent: Vec<String>,
    pub notify_failures: Vec<String>,
}

impl CycleReport {
    fn new(window: ObservationWindow) -> Self {
        Self {
            window,
            bootstrapped: false,
            scans: Vec::new(),
            reconciliation: Reconciliation::default(),
            persist_failures: Vec::new(),
            alerts_sent: Vec::new(),
            notify_failures: Vec::new(),
        }
    }

    /// Some listing failed and was treated as empty.
    pub fn degraded(&self) -> bool {
        self.scans
            .iter()
            .any(|s| matches!(s.outcome, ScanOutcome::Failed(_)))
    }
}

pub struct Monitor {
    deployment: Deployment,
    state: StateStore,
    lister: Arc<dyn SnapshotLister>,
    notifier: Arc<dyn Notifier>,
    policy: Policy,
    window: TimeDelta,
}

impl Monitor {
    pub fn new(
        deployment: Deployment,
        state: StateStore,
        lister: Arc<dyn SnapshotLister>,
        notifier: Arc<dyn Notifier>,
        config: &MonitorConfig,
    ) -> Result<Self, SnapwatchError> {
        config.validate()?;
        let window = TimeDelta::from_std(config.window).map_err(|e| {
            SnapwatchError::ConfigParsingError(format!("monitor.window out of range: {}", e))
        })?;
        Ok(Self {
            deployment,
            state,
            lister,
            notifier,
            policy: Policy::new(config.ignore_tables.iter().cloned(), config.missing_threshold),
            window,
        })
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Runs a single check as of `now`.
    ///
    /// Fails only when the persisted state cannot be read, before anything is
    /// written. Listing, write and notification failures are logged and
    /// recorded in the report.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<CycleReport, SnapwatchError> {
        let window = ObservationWindow::trailing(now, self.window);
        info!(
            "Checking snapshot consistency for {} → {}",
            display(window.start),
            display(window.end)
        );
        let mut report = CycleReport::new(window);

        let loaded = self.state.load_baseline().await?;
        let mut history = self.state.load_history().await?;

        let mut baseline = match loaded {
            Some(baseline) => baseline,
            None => {
                info!("No baseline found, bootstrapping from yesterday and today");
                let observation =
                    observe_partitions(self.lister.as_ref(), &bootstrap_partitions(now)).await;
                report.scans.extend(observation.scans);
                report.bootstrapped = true;
                let baseline: Baseline = observation.tables;
                self.save_baseline(&baseline, &mut report).await;
                info!("Bootstrapped baseline with {} tables", baseline.len());
                baseline
            }
        };
        info!("Baseline tables loaded: {}", baseline.len());

        let observation = observe_window(self.lister.as_ref(), &window).await;
        report.scans.extend(observation.scans);
        info!("Tables found in window: {}", observation.tables.len());

        let rec = reconcile(&mut baseline, &mut history, &observation.tables, &self.policy);
        info!("Missing tables: {:?}", rec.missing);
        info!("New tables: {:?}", rec.new_tables);

        if rec.baseline_changed() {
            self.save_baseline(&baseline, &mut report).await;
            info!("Updated baseline count: {}", baseline.len());
        }
        if let Err(e) = self.state.save_history(&history).await {
            error!("Failed to save missing history: {}", e);
            report.persist_failures.push(e.to_string());
        }

        let env = &self.deployment.environment;
        let alerts = [
            missing_alert(env, now, &window, &rec),
            new_tables_alert(env, now, &rec),
        ];
        if alerts.iter().all(Option::is_none) {
            info!("All {} expected tables were found in the window", rec.baseline_before);
        }
        for alert in alerts.into_iter().flatten() {
            self.notify(&alert, &mut report).await;
        }

        report.reconciliation = rec;
        if report.degraded() {
            warn!("Cycle completed with failed partition listings; results may over-report missing tables");
        }
        Ok(report)
    }

    async fn save_baseline(&self, baseline: &Baseline, report: &mut CycleReport) {
        if let Err(e) = self.state.save_baseline(baseline).await {
            error!("Failed to save baseline: {}", e);
            report.persist_failures.push(e.to_string());
        }
    }

    async fn notify(&self, alert: &Alert, report: &mut CycleReport) {
        match self.notifier.send(alert).await {
            Ok(()) => report.alerts_sent.push(alert.title.clone()),
            Err(e) => {
                error!("Failed to send alert '{}': {}", alert.title, e);
                report.notify_failures.push(e.to_string());
            }
        }
    }
}
