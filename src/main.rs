use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use photofeed::application::{FeedSession, LoadOutcome};
use photofeed::domain::entities::{AccessKey, ImageId};
use photofeed::infrastructure::config::ACCESS_KEY_ENV;
use photofeed::infrastructure::{
    AppConfig, CliArgs, ConfigOrigin, ConfigStore, FileFeedCache, UnsplashClient,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, ConfigOrigin)> {
    let store = match &args.config {
        Some(path) => Some(ConfigStore::at(path.clone())),
        None => ConfigStore::at_default_location().ok(),
    };

    let (mut config, origin) = match store {
        Some(store) => store.load()?,
        None => (AppConfig::default(), ConfigOrigin::Builtin),
    };
    config.merge_with_args(args);
    Ok((config, origin))
}

fn report_config_origin(origin: &ConfigOrigin) {
    match origin {
        ConfigOrigin::File(path) => info!(path = %path.display(), "Configuration loaded"),
        ConfigOrigin::Created(path) => {
            info!(path = %path.display(), "No config file found, wrote defaults");
        }
        ConfigOrigin::Fallback { path, reason } => {
            warn!(path = %path.display(), %reason, "Config file did not parse, using defaults");
        }
        ConfigOrigin::Builtin => warn!("No config directory available, using defaults"),
    }
}

fn build_session(config: &AppConfig, access_key: AccessKey) -> Result<(Arc<FeedSession>, FileFeedCache)> {
    let provider = UnsplashClient::with_base_url(
        access_key,
        config.api.root.clone(),
        config.request_timeout(),
    )?;

    let cache = config.cache.dir.clone().map_or_else(
        || FileFeedCache::default_location(config.cache_ttl()),
        |dir| FileFeedCache::new(dir, config.cache_ttl()),
    );

    let session = FeedSession::new(
        Arc::new(provider),
        Arc::new(cache.clone()),
        config.session_config(),
    );

    Ok((Arc::new(session), cache))
}

async fn run(args: CliArgs, config: AppConfig) -> Result<()> {
    let access_key = args
        .access_key
        .as_deref()
        .and_then(AccessKey::new)
        .ok_or_else(|| eyre!("no Unsplash access key; set {ACCESS_KEY_ENV} or pass --access-key"))?;

    info!(version = photofeed::VERSION, key = %access_key, "Starting photofeed");

    let (session, cache) = build_session(&config, access_key)?;

    if args.refresh {
        cache.evict(&config.cache.key).await;
    }

    match session.mount().await {
        Ok(source) => info!(?source, "Feed mounted"),
        Err(e) => warn!(error = %e, "Initial page failed"),
    }

    for _ in 1..args.pages {
        match session.load_more().await {
            Ok(LoadOutcome::Loaded { merge, rejected }) => {
                info!(appended = merge.appended, skipped = merge.skipped, rejected, "Page loaded");
            }
            Ok(outcome) => info!(?outcome, "No page loaded"),
            Err(e) => warn!(error = %e, "Page failed"),
        }
    }

    for id in &args.likes {
        let id = ImageId::new(id.as_str());
        match session.toggle_like(&id) {
            Some(toggle) => info!(%id, ?toggle, "Like toggled"),
            None => warn!(%id, "Feed is no longer mounted"),
        }
    }

    let snapshot = session
        .snapshot()
        .ok_or_else(|| eyre!("feed session was torn down"))?;

    for image in &snapshot.images {
        let heart = if snapshot.liked.contains(image.id()) { "♥" } else { "♡" };
        println!(
            "{} @{} {} {} [{}] {}",
            image.id(),
            image.username(),
            heart,
            image.likes(),
            image.country().unwrap_or("-"),
            image.urls().regular,
        );
    }

    session.unmount();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let (config, origin) = load_config(&args).wrap_err("failed to load configuration")?;

    init_logging(&config)?;
    report_config_origin(&origin);

    run(args, config).await
}
