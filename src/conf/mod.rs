mod config;
mod environment;
mod monitor;
mod notifier;
mod storage;

pub use config::Config;
pub use environment::{Deployment, EnvironmentConfig};
pub use monitor::MonitorConfig;
pub use notifier::NotifierConfig;
pub use storage::StorageConfig;
