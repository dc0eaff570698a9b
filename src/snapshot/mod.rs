mod lister;
mod name;
mod window;

pub use lister::{ObjectStoreLister, SnapshotLister};
pub use name::{SNAPSHOT_SEPARATOR, SnapshotId, snapshot_from_key};
pub use window::{DISPLAY_FORMAT, ObservationWindow, bootstrap_partitions, display};
