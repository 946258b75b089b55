//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::InterlinearApiService;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and service; both are read-only after startup.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Lookup service
  ///
  /// - Production: `Arc::new(InterlinearApiServiceFull::new(&config)?)`
  /// - Test: `Arc::new(StubInterlinearApiService)`
  pub service: Arc<dyn InterlinearApiService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn InterlinearApiService>) -> Self {
    Self { config, service }
  }
}
