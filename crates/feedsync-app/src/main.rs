mod cli;
mod input;
mod settings;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use feedsync_core::{
    ActivitySignal, ConnectivityProbe, FeedLogConfig, HttpStore, SessionHandle, SignalObserver,
};
use tokio::io::BufReader;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalRenderer;

fn init_logging(directive: &str) {
    let filter = match directive
        .parse::<Directive>()
        .or_else(|_| "feedsync=info".parse())
    {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let config = match settings::load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("feedsync: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(settings::log_directive(args.log_level.as_deref(), &config));
    tracing::info!("feedsync v{} starting", env!("CARGO_PKG_VERSION"));

    let store = match HttpStore::new(settings::store_config(&config.server)) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to create message store client: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(base_url = %store.base_url(), "connected to message store");
    let probe_target = store.host_port();

    let renderer = TerminalRenderer::new(
        FeedLogConfig {
            max_entries: config.display.max_entries as usize,
        },
        config.display.show_timestamps,
        std::io::stdout(),
    );
    let (session, task) = SessionHandle::spawn(
        Arc::new(store),
        renderer,
        settings::polling_policy(&config.polling),
        ActivitySignal::default(),
    );
    let observer = SignalObserver::new(session.clone());

    if config.probe.enabled {
        match probe_target {
            Some((host, port)) => {
                ConnectivityProbe::new(
                    host,
                    port,
                    Duration::from_secs(config.probe.interval_secs.into()),
                    Duration::from_millis(config.probe.timeout_ms.into()),
                )
                .spawn(observer.clone());
            }
            None => tracing::warn!("no host to probe, connectivity checks disabled"),
        }
    }

    input::run(BufReader::new(tokio::io::stdin()), &session, &observer).await;

    session.shutdown().await;
    match task.await {
        Ok(renderer) => {
            tracing::info!(entries = renderer.log().len(), "shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("session task failed: {e}");
            ExitCode::FAILURE
        }
    }
}
