mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use albumsync_core::{
    load_config, load_entries, validate_config, ConsoleSink, LidarrClient, LogFileSink,
    MusicCatalog, OutputSink, Reconciler, Reporter, SanitizedConfig,
};

use cli::Args;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // Diagnostics go to stderr; outcome lines go through the Reporter.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("albumsync v{}", VERSION);

    // Load configuration
    info!("Loading configuration from {:?}", args.config);
    let mut config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    args.apply_overrides(&mut config);

    // Validate after overrides so a bad flag is caught too
    validate_config(&config).context("Configuration validation failed")?;
    info!(
        config = %serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default(),
        "Configuration loaded"
    );

    // Read the CSV before touching Lidarr
    let entries = load_entries(&args.csv)
        .with_context(|| format!("Failed to read entries from {:?}", args.csv))?;
    info!("Loaded {} entries from {:?}", entries.len(), args.csv);

    let catalog: Arc<dyn MusicCatalog> = Arc::new(
        LidarrClient::new(config.lidarr.clone()).context("Failed to create Lidarr client")?,
    );

    let log: Option<Box<dyn OutputSink>> = if config.output.log.is_disabled() {
        None
    } else {
        let sink = LogFileSink::create(&config.output.log_file).with_context(|| {
            format!("Failed to create log file {:?}", config.output.log_file)
        })?;
        Some(Box::new(sink))
    };
    let reporter = Reporter::new(
        config.output.console,
        Box::new(ConsoleSink),
        config.output.log,
        log,
    );

    let mut reconciler = Reconciler::new(catalog, config.run, config.pacing, reporter);
    let summary = reconciler.run(&entries).await;

    info!(
        elapsed_ms = summary.elapsed().num_milliseconds(),
        "Run complete"
    );

    if args.json_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    }

    Ok(())
}
