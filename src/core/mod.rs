mod args;
mod error;
mod logger;

pub use args::CliArgs;
pub use error::SnapwatchError;
pub use logger::setup_logging;
