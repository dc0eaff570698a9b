use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SnapwatchError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("State error: {0}")]
    StateError(String),
    #[error("Listing error: {0}")]
    ListingError(String),
}

impl From<std::io::Error> for SnapwatchError {
    fn from(err: std::io::Error) -> Self {
        SnapwatchError::IoError(err.to_string())
    }
}

impl From<object_store::Error> for SnapwatchError {
    fn from(err: object_store::Error) -> Self {
        SnapwatchError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for SnapwatchError {
    fn from(err: serde_json::Error) -> Self {
        SnapwatchError::StateError(err.to_string())
    }
}
