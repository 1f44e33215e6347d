//! CiteNetX batch crawler
//!
//! Wires configuration to a crawl session:
//! 1. Optionally restores a saved checkpoint
//! 2. Expands the configured seed file, flagging seeds as the initial sample
//! 3. Saves a checkpoint of everything pulled
//! 4. Reports the session and quota summaries

use citenetx_common::config::ObservabilityConfig;
use citenetx_common::{AppConfig, VERSION};
use citenetx_explorer::query::INITIAL_FLAG;
use citenetx_explorer::{reports, CheckpointManager, ExplorerSession, FlagMap};
use citenetx_retrieval::ScopusClient;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.observability);

    info!("Starting CiteNetX v{}", VERSION);

    let client = ScopusClient::new(config.scopus.clone())?;
    let checkpoints = CheckpointManager::from_config(&config.checkpoint);
    let mut session = ExplorerSession::new(Arc::new(client), checkpoints);

    if let Some(key) = &config.crawl.resume_from {
        // a missing or unreadable checkpoint is already logged by the
        // session; crawling then starts from an empty state
        let _ = session.load_checkpoint(key);
    }

    let mut flags = FlagMap::new();
    flags.insert(INITIAL_FLAG.to_string(), Value::Bool(true));

    match &config.crawl.seed_file {
        Some(seed_file) => {
            session
                .expand_from_file(Path::new(seed_file), Some(config.crawl.target_depth), &flags)
                .await?;
        }
        None => warn!("no seed file configured; nothing to expand"),
    }

    if !session.store().is_empty() {
        let path = session.save_checkpoint(config.crawl.save_key.as_deref())?;
        info!(checkpoint = %path.display(), "session saved");

        for row in reports::year_distribution(session.store()) {
            info!(year = row.year, count = row.count, "publication year");
        }
    }

    let (quota_line, reset_line) = session.quota().summarize();
    info!("{quota_line}");
    info!("{reset_line}");

    println!("{session}");
    Ok(())
}
