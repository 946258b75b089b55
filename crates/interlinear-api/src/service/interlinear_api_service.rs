//! Interlinear lookup service for the HTTP layer

use std::sync::Arc;

use interlinear::books::BookCatalog;
use interlinear::models::VerseReference;
use interlinear::service::InterlinearService;
use interlinear::store::SqliteTokenStore;

use crate::config::Config;
use crate::errors::{ApiError, Result};
use crate::models::{BookDto, BooksResponse, HealthResponse, InterlinearResponse};

/// Common interface for the lookup service
///
/// This trait allows swapping the production implementation (`InterlinearApiServiceFull`) with
/// test stubs.
pub trait InterlinearApiService: Send + Sync {
  /// Resolves the book, looks up the verse and assembles the response
  ///
  /// # Errors
  /// - `UnknownBook` / `NoTokensForReference` / `InvalidReferenceFormat`
  /// - `StorageUnavailable`
  fn verse(&self, reference: &VerseReference) -> Result<InterlinearResponse>;

  /// Lists books present in the store
  ///
  /// # Errors
  /// `StorageUnavailable`
  fn books(&self) -> Result<BooksResponse>;

  /// Liveness payload
  fn health(&self) -> HealthResponse;
}

/// Production service: book catalog side file + SQLite token store
#[derive(Clone)]
pub struct InterlinearApiServiceFull {
  inner: InterlinearService,
  store: SqliteTokenStore,
}

impl InterlinearApiServiceFull {
  /// Initializes the service
  ///
  /// Loads the book catalog (built-in catalog if the side file is missing). The database is not
  /// opened until the first lookup.
  ///
  /// # Errors
  /// Returns a config error if the catalog file exists but is invalid
  pub fn new(config: &Config) -> Result<Self> {
    let catalog = BookCatalog::load_or_builtin(&config.book_codes_path)
      .map_err(|e| ApiError::config(format!("Failed to load book catalog: {e}")))?;
    tracing::info!(books = catalog.len(), "book catalog loaded");

    Ok(Self::with_catalog(catalog, SqliteTokenStore::new(&config.db_path)))
  }

  /// Builds the service from an already-loaded catalog and store
  #[must_use]
  pub fn with_catalog(catalog: BookCatalog, store: SqliteTokenStore) -> Self {
    let inner = InterlinearService::new(Arc::new(catalog), Arc::new(store.clone()));
    Self { inner, store }
  }

  /// Whether the configured database file exists
  #[must_use]
  pub fn database_exists(&self) -> bool {
    self.store.exists()
  }

  /// Resolves, looks up and assembles one verse
  ///
  /// # Errors
  /// See [`InterlinearApiService::verse`]
  pub fn verse(&self, reference: &VerseReference) -> Result<InterlinearResponse> {
    let verse = self.inner.verse(reference)?;
    Ok(InterlinearResponse::assemble(&verse.reference, verse.tokens))
  }

  /// Lists books present in the store
  ///
  /// # Errors
  /// `StorageUnavailable`
  pub fn books(&self) -> Result<BooksResponse> {
    let books = self.inner.books()?;
    Ok(BooksResponse { books: books.into_iter().map(BookDto::from).collect() })
  }

  /// Liveness payload
  #[must_use]
  pub fn health(&self) -> HealthResponse {
    HealthResponse { ok: self.store.exists(), db: self.store.path().display().to_string() }
  }
}

/// Production implementation of trait `InterlinearApiService`
impl InterlinearApiService for InterlinearApiServiceFull {
  fn verse(&self, reference: &VerseReference) -> Result<InterlinearResponse> {
    // Explicitly call the inherent method; `self.verse(...)` would recurse into the trait method.
    InterlinearApiServiceFull::verse(self, reference)
  }

  fn books(&self) -> Result<BooksResponse> {
    InterlinearApiServiceFull::books(self)
  }

  fn health(&self) -> HealthResponse {
    InterlinearApiServiceFull::health(self)
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use interlinear::Token;
  use interlinear::books::BookCode;
  use interlinear::seed::append_tokens;
  use tempfile::TempDir;

  use super::*;
  use crate::errors::ApiErrorKind;

  fn create_test_config(temp_dir: &TempDir) -> Config {
    Config {
      bind_addr: "127.0.0.1:0".to_string(),
      db_path: temp_dir.path().join("interlinear.sqlite3"),
      book_codes_path: temp_dir.path().join("book_codes.json"),
    }
  }

  fn seed(db_path: &Path) {
    let tokens: Vec<Token> = [(2, "bara", "H1254"), (1, "bereshit", "H7225")]
      .into_iter()
      .map(|(index, surface, strong)| Token {
        book_code: BookCode::new("GEN"),
        chapter: 1,
        verse: 1,
        token_index: index,
        surface: surface.to_string(),
        lemma: String::new(),
        translit: String::new(),
        gloss: String::new(),
        morph: String::new(),
        strong: strong.to_string(),
      })
      .collect();

    append_tokens(db_path, &tokens).unwrap();
  }

  #[test]
  fn new_uses_builtin_catalog_without_side_file() {
    let temp_dir = TempDir::new().unwrap();
    let service = InterlinearApiServiceFull::new(&create_test_config(&temp_dir)).unwrap();

    assert!(!service.database_exists());
    let health = service.health();
    assert!(!health.ok);
    assert!(health.db.ends_with("interlinear.sqlite3"));
  }

  #[test]
  fn new_rejects_malformed_side_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);
    std::fs::write(&config.book_codes_path, "not json").unwrap();

    let err = InterlinearApiServiceFull::new(&config).err().unwrap();
    assert_eq!(err.kind(), ApiErrorKind::Config);
  }

  #[test]
  fn verse_returns_ordered_tokens() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);
    seed(&config.db_path);

    let service = InterlinearApiServiceFull::new(&config).unwrap();
    let response = service.verse(&VerseReference::new("Genesis", 1, 1)).unwrap();

    assert_eq!(response.reference, "Genesis 1:1");
    assert_eq!(response.tokens.iter().map(|t| t.index).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(response.tokens[0].strong, "H7225");
    assert!(service.health().ok);
  }

  #[test]
  fn verse_errors_map_to_api_kinds() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);

    // before seeding: storage failure
    let service = InterlinearApiServiceFull::new(&config).unwrap();
    let err = service.verse(&VerseReference::new("GEN", 1, 1)).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::StorageUnavailable);

    seed(&config.db_path);
    let err = service.verse(&VerseReference::new("XXX", 1, 1)).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::UnknownBook);
    let err = service.verse(&VerseReference::new("GEN", 99, 99)).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::NoTokensForReference);
  }

  #[test]
  fn books_lists_seeded_books() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);
    seed(&config.db_path);

    let service = InterlinearApiServiceFull::new(&config).unwrap();
    let books = service.books().unwrap();
    assert_eq!(books.books, vec![BookDto { code: "GEN".to_string(), name: "Genesis".to_string() }]);
  }
}
