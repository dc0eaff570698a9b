use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::snapshot::{ObservationWindow, SnapshotId, SnapshotLister};

/// How listing one partition went. A failure degrades to no snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Found(usize),
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionScan {
    pub partition: NaiveDate,
    pub outcome: ScanOutcome,
}

/// Table names seen, plus how each partition listing went.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub tables: BTreeSet<String>,
    pub scans: Vec<PartitionScan>,
}

async fn scan(
    lister: &dyn SnapshotLister,
    partition: NaiveDate,
) -> (BTreeSet<SnapshotId>, PartitionScan) {
    let (snapshots, outcome) = match lister.list(partition).await {
        Ok(snapshots) if snapshots.is_empty() => (snapshots, ScanOutcome::Empty),
        Ok(snapshots) => {
            let found = snapshots.len();
            (snapshots, ScanOutcome::Found(found))
        }
        Err(e) => {
            log::warn!(
                "Listing partition {} failed, treating it as empty: {}",
                partition,
                e
            );
            (BTreeSet::new(), ScanOutcome::Failed(e.to_string()))
        }
    };
    (snapshots, PartitionScan { partition, outcome })
}

/// Every table with any snapshot in the given partitions.
pub async fn observe_partitions(
    lister: &dyn SnapshotLister,
    partitions: &[NaiveDate],
) -> Observation {
    let mut observation = Observation::default();
    for partition in partitions {
        let (snapshots, scan) = scan(lister, *partition).await;
        observation
            .tables
            .extend(snapshots.into_iter().map(|id| id.table));
        observation.scans.push(scan);
    }
    observation
}

/// Tables with a snapshot taken inside the window. Snapshots whose
/// timestamp does not parse are skipped.
pub async fn observe_window(lister: &dyn SnapshotLister, window: &ObservationWindow) -> Observation {
    let mut observation = Observation::default();
    for partition in window.partitions() {
        let (snapshots, scan) = scan(lister, partition).await;
        for id in snapshots {
            match id.taken_at() {
                Some(ts) if window.contains(ts) => {
                    observation.tables.insert(id.table);
                }
                Some(_) => {}
                None => log::debug!("Skipping {}: unparsable timestamp", id),
            }
        }
        observation.scans.push(scan);
    }
    observation
}
