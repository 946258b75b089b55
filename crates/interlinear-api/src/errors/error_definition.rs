//! API error definitions

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use interlinear::errors::{InterlinearError, ReferenceError};

/// Error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// Book identifier does not resolve
  UnknownBook,
  /// Book resolves but nothing is stored for the chapter/verse
  NoTokensForReference,
  /// Chapter/verse are not positive integers, or the book is blank
  InvalidReferenceFormat,
  /// The token store cannot be opened or queried
  StorageUnavailable,
  /// Internal error
  Internal,
  /// Configuration error
  Config,
}

impl ApiErrorKind {
  /// Error code carried in the response body
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::UnknownBook => "unknown_book",
      Self::NoTokensForReference => "no_tokens_for_reference",
      Self::InvalidReferenceFormat => "invalid_reference_format",
      Self::StorageUnavailable => "storage_unavailable",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::UnknownBook | Self::NoTokensForReference => StatusCode::NOT_FOUND,
      Self::InvalidReferenceFormat => StatusCode::BAD_REQUEST,
      Self::StorageUnavailable | Self::Internal | Self::Config => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
  /// Book identifier does not resolve
  #[error("Unknown book: {0}")]
  UnknownBook(String),

  /// No tokens stored for a resolved reference
  #[error("No tokens found for {0}")]
  NoTokensForReference(String),

  /// Malformed reference
  #[error("Invalid reference: {0}")]
  InvalidReferenceFormat(String),

  /// Storage failure
  #[error("Storage unavailable: {0}")]
  StorageUnavailable(String),

  /// Internal error
  #[error("Internal error: {0}")]
  Internal(String),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),
}

impl ApiError {
  /// Error kind
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::UnknownBook(_) => ApiErrorKind::UnknownBook,
      Self::NoTokensForReference(_) => ApiErrorKind::NoTokensForReference,
      Self::InvalidReferenceFormat(_) => ApiErrorKind::InvalidReferenceFormat,
      Self::StorageUnavailable(_) => ApiErrorKind::StorageUnavailable,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// Error code
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// HTTP status code
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// Creates an invalid reference error
  #[must_use]
  pub fn invalid_reference(message: impl Into<String>) -> Self {
    Self::InvalidReferenceFormat(message.into())
  }

  /// Creates a storage error
  #[must_use]
  pub fn storage(message: impl Into<String>) -> Self {
    Self::StorageUnavailable(message.into())
  }

  /// Creates an internal error
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// Creates a configuration error
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

/// JSON error body
#[derive(Serialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
  code: &'static str,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(code = self.code(), error = %self, "request failed");
    }

    let body = ErrorResponse { error: ErrorBody { code: self.code(), message: self.to_string() } };

    (status, Json(body)).into_response()
  }
}

impl From<ReferenceError> for ApiError {
  fn from(err: ReferenceError) -> Self {
    match err {
      ReferenceError::UnknownBook { identifier } => ApiError::UnknownBook(identifier),
      ReferenceError::NoTokens { reference } => ApiError::NoTokensForReference(reference),
      ReferenceError::InvalidFormat { reason } => ApiError::InvalidReferenceFormat(reason),
      // #[non_exhaustive]: variants added later surface as internal errors
      other => ApiError::internal(other.to_string()),
    }
  }
}

/// Maps domain errors to API errors
impl From<InterlinearError> for ApiError {
  fn from(err: InterlinearError) -> Self {
    match err {
      InterlinearError::Reference(err) => err.into(),
      InterlinearError::Store(err) => ApiError::storage(err.to_string()),
      InterlinearError::Catalog(err) => ApiError::config(format!("book catalog: {err}")),
      InterlinearError::Seed(err) => ApiError::internal(format!("seeding: {err}")),
      _ => ApiError::internal(format!("unknown error: {err}")),
    }
  }
}

/// Result alias
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
  use super::*;
  use interlinear::errors::{CatalogError, StoreError};

  #[test]
  fn not_found_kinds_share_status_but_not_code() {
    let unknown = ApiError::UnknownBook("XXX".to_string());
    let empty = ApiError::NoTokensForReference("Genesis 99:99".to_string());

    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);
    assert_eq!(unknown.code(), "unknown_book");
    assert_eq!(empty.code(), "no_tokens_for_reference");
  }

  #[test]
  fn invalid_reference_is_bad_request() {
    let err = ApiError::invalid_reference("chapter must be a positive integer");
    assert_eq!(err.kind(), ApiErrorKind::InvalidReferenceFormat);
    assert_eq!(err.code(), "invalid_reference_format");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn storage_and_config_are_server_errors() {
    assert_eq!(ApiError::storage("down").status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ApiError::config("bad").code(), "config_error");
    assert_eq!(ApiError::internal("join").code(), "internal_error");
  }

  #[test]
  fn from_reference_errors() {
    let err: ApiError =
      InterlinearError::from(ReferenceError::UnknownBook { identifier: "XXX".to_string() }).into();
    assert_eq!(err.kind(), ApiErrorKind::UnknownBook);
    assert!(err.to_string().contains("XXX"));

    let err: ApiError =
      InterlinearError::from(ReferenceError::NoTokens { reference: "Genesis 99:99".to_string() })
        .into();
    assert_eq!(err.kind(), ApiErrorKind::NoTokensForReference);

    let err: ApiError =
      InterlinearError::from(ReferenceError::InvalidFormat { reason: "x".to_string() }).into();
    assert_eq!(err.kind(), ApiErrorKind::InvalidReferenceFormat);
  }

  #[test]
  fn from_store_error_is_storage_unavailable() {
    let err: ApiError = InterlinearError::from(missing_database_error()).into();
    assert_eq!(err.kind(), ApiErrorKind::StorageUnavailable);
    assert_eq!(err.code(), "storage_unavailable");
  }

  #[test]
  fn from_catalog_error_is_config() {
    let err: ApiError = InterlinearError::from(CatalogError::Empty).into();
    assert_eq!(err.kind(), ApiErrorKind::Config);
  }

  /// A real storage error, produced without depending on rusqlite directly
  fn missing_database_error() -> StoreError {
    use interlinear::BookCode;
    use interlinear::store::{SqliteTokenStore, TokenStore};

    let dir = tempfile::TempDir::new().unwrap();
    SqliteTokenStore::new(dir.path().join("absent.sqlite3"))
      .verse_tokens(&BookCode::new("GEN"), 1, 1)
      .unwrap_err()
  }
}
