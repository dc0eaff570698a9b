use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Closed time interval `[start, end]` a snapshot must fall into to count
/// as observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ObservationWindow {
    pub fn trailing(now: DateTime<Utc>, width: TimeDelta) -> Self {
        Self {
            start: now - width,
            end: now,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Day partitions the window touches, oldest first, without duplicates.
    pub fn partitions(&self) -> Vec<NaiveDate> {
        let last = self.end.date_naive();
        let mut days = Vec::new();
        let mut day = Some(self.start.date_naive());
        while let Some(d) = day.filter(|d| *d <= last) {
            days.push(d);
            day = d.succ_opt();
        }
        days
    }
}

/// Partitions scanned when there is no baseline yet: yesterday and today.
pub fn bootstrap_partitions(now: DateTime<Utc>) -> [NaiveDate; 2] {
    let today = now.date_naive();
    [(now - TimeDelta::days(1)).date_naive(), today]
}

pub fn display(ts: DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 8, h, m, 0).unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = ObservationWindow::trailing(at(12, 0), TimeDelta::hours(1));
        assert!(window.contains(at(11, 0)));
        assert!(window.contains(at(11, 30)));
        assert!(window.contains(at(12, 0)));
        assert!(!window.contains(at(10, 59)));
        assert!(!window.contains(at(12, 1)));
    }

    #[test]
    fn test_partitions_single_day() {
        let window = ObservationWindow::trailing(at(12, 0), TimeDelta::hours(1));
        assert_eq!(
            window.partitions(),
            vec![NaiveDate::from_ymd_opt(2025, 10, 8).unwrap()]
        );
    }

    #[test]
    fn test_partitions_across_midnight() {
        let window = ObservationWindow::trailing(at(0, 20), TimeDelta::hours(1));
        assert_eq!(
            window.partitions(),
            vec![
                NaiveDate::from_ymd_opt(2025, 10, 7).unwrap(),
                NaiveDate::from_ymd_opt(2025, 10, 8).unwrap(),
            ]
        );
    }

    #[test]
    fn test_bootstrap_partitions() {
        let [yesterday, today] = bootstrap_partitions(at(0, 5));
        assert_eq!(yesterday, NaiveDate::from_ymd_opt(2025, 10, 7).unwrap());
        assert_eq!(today, NaiveDate::from_ymd_opt(2025, 10, 8).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(display(at(9, 5)), "2025-10-08 09:05:00 UTC");
    }
}
