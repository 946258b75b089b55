//! interlinear-api server entry point

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use interlinear_api::ApiError;
use interlinear_api::api::AppState;
use interlinear_api::api::run_server;
use interlinear_api::config::Config;
use interlinear_api::service::InterlinearApiServiceFull;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // Logging (RUST_LOG, default info)
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;
  tracing::info!(
    db = %config.db_path.display(),
    book_codes = %config.book_codes_path.display(),
    "configuration loaded"
  );

  let service = Arc::new(InterlinearApiServiceFull::new(&config)?);
  if !service.database_exists() {
    tracing::warn!(db = %config.db_path.display(), "database file not found; lookups will fail");
  }

  let state = AppState::new(config, service);

  run_server(state).await
}
