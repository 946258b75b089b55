//! HTTP handler definitions

use axum::{
  Json,
  extract::{Path, State},
};
use tracing::{debug, error, info};

use crate::errors::ApiError;
use crate::models::{BooksResponse, HealthResponse, InterlinearResponse, VersePath};

use super::state::AppState;

/// GET /interlinear/{book}/{chapter}/{verse}
///
/// Returns the word-by-word tokens of one verse.
/// `book` is a code (`GEN`) or a full name (`Genesis`), case-insensitive.
///
/// # Response
/// - 200 OK: tokens in reading order
/// - 400 Bad Request: chapter/verse not positive integers
/// - 404 Not Found: unknown book, or no tokens for the reference
/// - 500 Internal Server Error: storage unavailable
pub async fn get_interlinear_verse(
  State(state): State<AppState>,
  Path(path): Path<VersePath>,
) -> Result<Json<InterlinearResponse>, ApiError> {
  debug!(book = %path.book, chapter = %path.chapter, verse = %path.verse, "verse request");

  let reference = path.to_reference()?;

  // SQLite I/O is blocking; keep it off the async worker threads
  let service = state.service.clone();
  let response = tokio::task::spawn_blocking(move || service.verse(&reference)).await.map_err(
    |e| {
      error!(error = %e, "spawn_blocking error");
      ApiError::internal("failed to run lookup")
    },
  )??;

  info!(
    reference = %response.reference,
    token_count = response.tokens.len(),
    "verse served"
  );

  Ok(Json(response))
}

/// GET /books
///
/// Lists the books present in the store with their display names.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<BooksResponse>, ApiError> {
  let service = state.service.clone();
  let response = tokio::task::spawn_blocking(move || service.books()).await.map_err(|e| {
    error!(error = %e, "spawn_blocking error");
    ApiError::internal("failed to list books")
  })??;

  debug!(book_count = response.books.len(), "books listed");
  Ok(Json(response))
}

/// Health check endpoint
///
/// Always 200; `ok` reports whether the database file exists.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
  Json(state.service.health())
}
