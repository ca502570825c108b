use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};
use watchtower::config::read_config_file;
use watchtower::notify::WebhookNotifier;
use watchtower::probe::{HttpProbe, Prober};
use watchtower::store::{self, HealthStore};
use watchtower::supervisor::Supervisor;

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file
    #[arg(short)]
    file: String,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("watchtower", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = read_config_file(&args.file)?;

    let storage = config.storage.clone().unwrap_or_default();
    let store = store::from_config(&storage).await?;

    let notifier = Arc::new(WebhookNotifier::new());

    let probes = config
        .targets
        .iter()
        .map(|target| {
            HttpProbe::new(Duration::from_secs(target.timeout))
                .map(|probe| Arc::new(probe) as Arc<dyn Prober>)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let supervisor = Supervisor::start(&config, probes, store.clone(), notifier);

    // Run until externally terminated
    tokio::signal::ctrl_c().await?;
    debug!("received ctrl-c, shutting down");

    supervisor.shutdown().await;
    store.close().await?;

    Ok(())
}
