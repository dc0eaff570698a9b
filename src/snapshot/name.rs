use chrono::{DateTime, NaiveDateTime, Utc};

/// Separator between table name and timestamp in a snapshot identifier.
pub const SNAPSHOT_SEPARATOR: &str = "_SNAPSHOT_";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";
const AUX_SUFFIXES: [&str; 2] = [".snapshotinfo", "data.manifest"];

/// A snapshot identifier of the form `<table>_SNAPSHOT_<YYYYMMDDHHMM>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId {
    pub table: String,
    pub suffix: String,
}

impl SnapshotId {
    /// Splits on the first separator. Returns None when the separator is
    /// absent or the table part is empty.
    pub fn parse(name: &str) -> Option<Self> {
        let (table, suffix) = name.split_once(SNAPSHOT_SEPARATOR)?;
        if table.is_empty() {
            return None;
        }
        Some(Self {
            table: table.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Snapshot time decoded from the suffix, or None if it doesn't parse.
    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.suffix, TIMESTAMP_FORMAT)
            .ok()
            .map(|ts| ts.and_utc())
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.table, SNAPSHOT_SEPARATOR, self.suffix)
    }
}

/// Extracts the snapshot identifier from an object key.
///
/// Keys look like `<cluster>/hbase/<date>/.hbase-snapshot/<snapshot>/<file>`;
/// the identifier is the fifth path segment. Auxiliary entries and keys
/// without the separator yield None.
pub fn snapshot_from_key(key: &str) -> Option<SnapshotId> {
    let segment = key.split('/').nth(4)?;
    if AUX_SUFFIXES.iter().any(|s| segment.ends_with(s)) {
        return None;
    }
    SnapshotId::parse(segment)
}
