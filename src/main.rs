use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use log::{error, info};

use snapwatch::conf::{Config, Deployment};
use snapwatch::core::{CliArgs, setup_logging};
use snapwatch::io::create_store;
use snapwatch::monitor::Monitor;
use snapwatch::notify;
use snapwatch::snapshot::ObjectStoreLister;
use snapwatch::state::{ObjectStoreBlobStore, StateStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    setup_logging();
    info!(config:? = args.config, at:? = args.at; "Snapwatch started.");

    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let deployment = Deployment::resolve(&config).context("resolving environment")?;
    info!(
        "Environment {} (region {}, bucket {}, cluster {})",
        deployment.environment, deployment.region, deployment.bucket, deployment.cluster
    );

    let store = create_store(&config.storage, &deployment).context("creating object store")?;
    let state = StateStore::for_deployment(
        Arc::new(ObjectStoreBlobStore::new(store.clone())),
        &deployment,
    );
    let lister = Arc::new(ObjectStoreLister::new(store, deployment.clone()));
    let notifier = notify::from_config(&config.notifier, &deployment.environment)
        .context("creating notifier")?;
    let monitor = Monitor::new(deployment, state, lister, notifier, &config.monitor)
        .context("creating monitor")?;

    let now = args.at.unwrap_or_else(Utc::now);
    match monitor.run(now).await {
        Ok(report) => info!(
            "Check finished: {} missing, {} new, {} evicted, {} alerts sent, {} failures",
            report.reconciliation.missing.len(),
            report.reconciliation.new_tables.len(),
            report.reconciliation.evicted.len(),
            report.alerts_sent.len(),
            report.persist_failures.len() + report.notify_failures.len()
        ),
        Err(e) => error!("Check aborted: {}", e),
    }

    Ok(())
}
