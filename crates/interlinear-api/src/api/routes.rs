//! Router definition

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use super::handlers::{get_interlinear_verse, health_check, list_books};
use super::state::AppState;
use crate::errors::ApiError;

/// Creates the API router
///
/// CORS is open to any origin.
///
/// # Arguments
/// * `state` - Application state
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/interlinear/{book}/{chapter}/{verse}", get(get_interlinear_verse))
    .route("/books", get(list_books))
    .route("/health", get(health_check))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
    )
    .with_state(state)
}

/// Starts the server
///
/// # Arguments
/// * `state` - Application state
///
/// # Errors
/// Returns an error if binding or serving fails
pub async fn run_server(state: AppState) -> crate::errors::Result<()> {
  let addr = state.config.bind_addr.clone();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .map_err(|e| ApiError::config(format!("failed to bind {addr}: {e}")))?;

  tracing::info!("listening on http://{}", addr);

  let router = create_router(state);

  axum::serve(listener, router)
    .await
    .map_err(|e| ApiError::internal(format!("server error: {e}")))?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;
  use std::sync::Arc;

  use interlinear::models::VerseReference;

  use super::*;
  use crate::config::Config;
  use crate::errors::Result as ApiResult;
  use crate::models::{BooksResponse, HealthResponse, InterlinearResponse};
  use crate::service::InterlinearApiService;

  /// Dummy implementation that never touches a database
  struct DummyService;

  impl InterlinearApiService for DummyService {
    fn verse(&self, _reference: &VerseReference) -> ApiResult<InterlinearResponse> {
      Err(ApiError::storage("dummy"))
    }

    fn books(&self) -> ApiResult<BooksResponse> {
      Ok(BooksResponse { books: Vec::new() })
    }

    fn health(&self) -> HealthResponse {
      HealthResponse { ok: false, db: "dummy".to_string() }
    }
  }

  #[test]
  fn test_router_creation() {
    let config = Config {
      bind_addr: "127.0.0.1:0".to_string(),
      db_path: PathBuf::from("dummy.sqlite3"),
      book_codes_path: PathBuf::from("dummy.json"),
    };
    let state = AppState::new(config, Arc::new(DummyService));
    let _router = create_router(state);
  }
}
