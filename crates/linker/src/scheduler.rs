use crate::fs::OutputFs;
use crate::reconcile::Reconciler;
use crate::scan::SourceScanner;
use crate::stats::CycleStats;
use crate::Result;
use log::{error, info};
use serilink_cluster::{cluster_entries, entries_from_paths, NormalizeRules, Thresholds};
use std::time::{Duration, Instant};
use tokio::time::{self, MissedTickBehavior};

/// One full scan → cluster → reconcile pass, repeated on a fixed interval.
///
/// No state survives between cycles; each tick re-reads the live
/// filesystem, so a failed cycle self-heals on the next one.
pub struct Pipeline<F: OutputFs> {
    scanner: SourceScanner,
    rules: NormalizeRules,
    thresholds: Thresholds,
    reconciler: Reconciler<F>,
}

impl<F: OutputFs> Pipeline<F> {
    pub fn new(
        scanner: SourceScanner,
        rules: NormalizeRules,
        thresholds: Thresholds,
        reconciler: Reconciler<F>,
    ) -> Self {
        Self {
            scanner,
            rules,
            thresholds,
            reconciler,
        }
    }

    /// Run a single cycle sequentially and synchronously. Errors abort
    /// the cycle; the scheduler retries from a fresh scan on the next
    /// tick rather than retrying in place.
    pub fn run_cycle(&self) -> Result<CycleStats> {
        let paths = self.scanner.scan()?;
        let entries = entries_from_paths(paths, &self.rules);

        let mut stats = CycleStats {
            sources: entries.len(),
            ..CycleStats::default()
        };

        let partition = cluster_entries(entries, &self.thresholds, &self.rules);
        stats.clusters = partition.clusters.len();

        self.reconciler.materialize(&partition, &mut stats)?;
        self.reconciler.cleanup(&mut stats)?;
        Ok(stats)
    }

    /// Cycle immediately, then on every interval tick, forever.
    pub async fn run_forever(&self, interval: Duration) {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let started = Instant::now();
            match self.run_cycle() {
                Ok(stats) => {
                    let duration = started.elapsed().as_millis();
                    let summary =
                        serde_json::to_string(&stats).unwrap_or_else(|_| String::from("{}"));
                    info!("cycle finished in {duration}ms: {summary}");
                }
                Err(e) => error!("cycle failed, retrying next tick: {e}"),
            }
        }
    }
}
