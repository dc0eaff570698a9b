use chrono::{DateTime, Utc};

use crate::notify::{Alert, Severity};
use crate::snapshot::{ObservationWindow, display};

use super::reconcile::Reconciliation;

fn bullet_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("- `{}`", name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Alert for tables expected but not seen in the window. None when nothing is missing.
pub fn missing_alert(
    environment: &str,
    now: DateTime<Utc>,
    window: &ObservationWindow,
    rec: &Reconciliation,
) -> Option<Alert> {
    if rec.missing.is_empty() {
        return None;
    }

    let mut body = format!(
        "**Timestamp:** {}\n\n\
         **Period:** `{}` → `{}`\n\n\
         **Baseline Tables (before):** {}\n\n\
         **Last Hour Tables:** {}\n\n\
         **Missing Tables (count):** {}\n\n\
         **Tables Missing in This Hour:**\n{}\n\n",
        display(now),
        display(window.start),
        display(window.end),
        rec.baseline_before,
        rec.observed,
        rec.missing.len(),
        bullet_list(&rec.missing)
    );
    // Size after the whole cycle, so tables added alongside the eviction count.
    if !rec.evicted.is_empty() {
        body.push_str(&format!(
            "**Baseline preview after removal:** {}\n\n",
            rec.baseline_after
        ));
    }
    let evicted = if rec.evicted.is_empty() {
        String::from("none")
    } else {
        rec.evicted.join(", ")
    };
    body.push_str(&format!(
        "**Tables reaching removal threshold:** {}\n",
        evicted
    ));

    Some(Alert {
        title: format!("[{}] Snapshot Alert - Missing Tables in Last Hour", environment),
        body,
        severity: Severity::Attention,
    })
}

/// Informational alert for tables seen for the first time. None when there are none.
pub fn new_tables_alert(
    environment: &str,
    now: DateTime<Utc>,
    rec: &Reconciliation,
) -> Option<Alert> {
    if rec.new_tables.is_empty() {
        return None;
    }

    let body = format!(
        "**Timestamp:** {}\n\n**New tables detected:** {}\n\n{}\n\n**Updated baseline count:** {}\n",
        display(now),
        rec.new_tables.len(),
        bullet_list(&rec.new_tables),
        rec.baseline_after
    );

    Some(Alert {
        title: format!("[{}] Snapshot Info - New Tables Detected", environment),
        body,
        severity: Severity::Good,
    })
}
