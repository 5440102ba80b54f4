use std::sync::Arc;

use barangay_portal_core::notifications::{BadgeService, BadgeServiceTrait, LogDiagnosticSink};
use barangay_portal_storage_sqlite::{
    db, RecordRepository, ViewerRepository, WatermarkRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub badge_service: Arc<dyn BadgeServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("BP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let viewer_repository = Arc::new(ViewerRepository::new(pool.clone()));
    let watermark_repository = Arc::new(WatermarkRepository::new(pool.clone(), writer));
    let record_repository = Arc::new(RecordRepository::new(pool.clone()));

    let badge_service: Arc<dyn BadgeServiceTrait> = Arc::new(BadgeService::new(
        viewer_repository,
        watermark_repository,
        record_repository,
        Arc::new(LogDiagnosticSink),
    ));

    Ok(Arc::new(AppState {
        badge_service,
        db_path,
    }))
}
