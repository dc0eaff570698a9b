use std::collections::BTreeSet;

use crate::state::{Baseline, MissingHistory};

/// Ignore list and eviction threshold applied to every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub ignore: BTreeSet<String>,
    /// Consecutive misses that evict a table. Values below 1 act as 1.
    pub threshold: u32,
}

impl Policy {
    pub fn new(ignore: impl IntoIterator<Item = String>, threshold: u32) -> Self {
        Self {
            ignore: ignore.into_iter().collect(),
            threshold,
        }
    }
}

/// What one cycle changed. All name lists are sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Baseline size going into the diff, after dropping ignored names.
    pub baseline_before: usize,
    pub baseline_after: usize,
    pub observed: usize,
    pub missing: Vec<String>,
    pub new_tables: Vec<String>,
    pub evicted: Vec<String>,
    pub recovered: Vec<String>,
    /// Ignored names that were present in the loaded baseline.
    pub purged: Vec<String>,
}

impl Reconciliation {
    pub fn baseline_changed(&self) -> bool {
        !self.new_tables.is_empty() || !self.evicted.is_empty() || !self.purged.is_empty()
    }
}

/// `(left - right) - ignore`, sorted.
pub fn difference(
    left: &BTreeSet<String>,
    right: &BTreeSet<String>,
    ignore: &BTreeSet<String>,
) -> Vec<String> {
    left.iter()
        .filter(|name| !right.contains(*name) && !ignore.contains(*name))
        .cloned()
        .collect()
}

/// Diffs `observed` against `baseline`, advances the miss counters and
/// applies additions and evictions to both in place.
pub fn reconcile(
    baseline: &mut Baseline,
    history: &mut MissingHistory,
    observed: &BTreeSet<String>,
    policy: &Policy,
) -> Reconciliation {
    let threshold = policy.threshold.max(1);

    let purged: Vec<String> = baseline.intersection(&policy.ignore).cloned().collect();
    for name in &purged {
        baseline.remove(name);
    }
    history.retain(|name, _| !policy.ignore.contains(name));

    let baseline_before = baseline.len();
    let missing = difference(baseline, observed, &policy.ignore);
    let new_tables = difference(observed, baseline, &policy.ignore);

    for name in &new_tables {
        log::info!("{} is new, adding to baseline", name);
        baseline.insert(name.clone());
    }

    let mut evicted = Vec::new();
    for name in &missing {
        let count = history.entry(name.clone()).or_insert(0);
        *count = count.saturating_add(1);
        log::info!("{} missing count -> {}", name, count);
        if *count >= threshold {
            evicted.push(name.clone());
        }
    }

    let recovered: Vec<String> = history
        .keys()
        .filter(|name| observed.contains(*name) && missing.binary_search(*name).is_err())
        .cloned()
        .collect();
    for name in &recovered {
        log::info!("{} recovered, counter reset", name);
        history.remove(name);
    }

    if !evicted.is_empty() {
        log::warn!("Tables removed from baseline: {:?}", evicted);
    }
    for name in &evicted {
        baseline.remove(name);
        history.remove(name);
    }

    Reconciliation {
        baseline_before,
        baseline_after: baseline.len(),
        observed: observed.len(),
        missing,
        new_tables,
        evicted,
        recovered,
        purged,
    }
}
