use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use wunderlists_weather::alerts::AlertService;
use wunderlists_weather::api::AppState;
use wunderlists_weather::config::AppConfig;
use wunderlists_weather::tasks::JsonTaskStore;
use wunderlists_weather::weather::{ForecastCache, OpenMeteoClient};
use wunderlists_weather::{VERSION, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    info!(version = VERSION, "starting weather alert service");

    let client = OpenMeteoClient::new(&config.weather)?;
    let cache = Arc::new(ForecastCache::new(
        Arc::new(client),
        Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60),
    ));
    let service = Arc::new(AlertService::new(cache, config.monitored_locations()));
    let tasks = Arc::new(JsonTaskStore::new(&config.tasks.path));

    web::run(&config.server, AppState { service, tasks }).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
