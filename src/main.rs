use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use clinic_kiosk::application::LoadContentUseCase;
use clinic_kiosk::domain::ports::{AnalyticsPort, ContentPort, PreferencesPort};
use clinic_kiosk::infrastructure::config::AnalyticsSink;
use clinic_kiosk::infrastructure::{
    AppConfig, BundledContent, CliArgs, DisabledAnalytics, FilePreferencesStore,
    JsonFileContent, JsonLinesAnalytics, LinkOpener, StorageManager, TokioScheduler,
    TracingAnalytics,
};
use clinic_kiosk::presentation::{App, AppPorts};

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
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

/// File config first, then command line overrides.
fn load_config() -> (AppConfig, Option<StorageManager>) {
    let args = CliArgs::parse();

    let storage = StorageManager::new().ok();
    let mut config = storage
        .as_ref()
        .and_then(|s| s.load_config(args.config.as_deref()).ok())
        .unwrap_or_default();
    config.merge_with_args(args);

    (config, storage)
}

fn analytics_sink(config: &AppConfig) -> Arc<dyn AnalyticsPort> {
    if !config.analytics.enabled {
        return Arc::new(DisabledAnalytics);
    }
    match (config.analytics.sink, config.effective_analytics_path()) {
        (AnalyticsSink::File, Some(path)) => {
            info!(path = %path.display(), "Recording analytics to file");
            Arc::new(JsonLinesAnalytics::new(path))
        }
        (AnalyticsSink::File, None) => {
            warn!("No analytics path available, logging events instead");
            Arc::new(TracingAnalytics::new())
        }
        (AnalyticsSink::Log, _) => Arc::new(TracingAnalytics::new()),
    }
}

async fn create_app() -> Result<(App, bool)> {
    let (config, storage) = load_config();

    init_logging(&config)?;

    info!(version = clinic_kiosk::VERSION, "Starting {}", clinic_kiosk::NAME);

    let preferences: Arc<dyn PreferencesPort> = match &storage {
        Some(storage) => Arc::new(FilePreferencesStore::new(storage.preferences_path())),
        None => {
            warn!("No configuration directory, text size will not be remembered");
            Arc::new(FilePreferencesStore::unavailable())
        }
    };

    let file_content = config
        .content
        .clone()
        .map(|path| Arc::new(JsonFileContent::new(path)) as Arc<dyn ContentPort>);
    let loaded = LoadContentUseCase::new(file_content, Arc::new(BundledContent))
        .execute()
        .await?;

    let ports = AppPorts {
        preferences,
        analytics: analytics_sink(&config),
        scheduler: Arc::new(TokioScheduler::current()),
        links: LinkOpener::new(true),
    };

    Ok((App::new(loaded, &config, ports), config.mouse))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (app, mouse) = create_app().await?;

    let mut terminal = ratatui::init();
    if mouse && let Err(e) = execute!(stdout(), EnableMouseCapture) {
        warn!(error = %e, "Mouse capture unavailable");
    }

    let result = app.run(&mut terminal).await;

    if mouse {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
    ratatui::restore();

    result
}
