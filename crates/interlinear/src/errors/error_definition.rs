//! Error definitions

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading the book catalog side file
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CatalogError {
  /// The catalog file could not be read
  #[error("failed to read book catalog: path={path:?}, error={source}")]
  Read {
    /// Catalog file path
    path: PathBuf,
    /// Underlying IO error
    #[source]
    source: Arc<io::Error>,
  },

  /// The catalog file is not valid JSON of the expected shape
  #[error("failed to parse book catalog: {source}")]
  Parse {
    /// Underlying JSON error
    #[source]
    source: Arc<serde_json::Error>,
  },

  /// An entry carries an unusable code or name
  #[error("invalid book catalog entry: code={code:?}, reason={reason}")]
  InvalidEntry {
    /// Offending key
    code: String,
    /// Why the entry was rejected
    reason: String,
  },

  /// Two different codes claim the same alias
  #[error("book alias {alias:?} is claimed by both {first} and {second}")]
  DuplicateAlias {
    /// Lowercased alias
    alias: String,
    /// Code that registered the alias first
    first: String,
    /// Code that tried to register it again
    second: String,
  },

  /// The catalog has no entries at all
  #[error("book catalog is empty")]
  Empty,
}

/// Errors tied to a caller-supplied verse reference
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReferenceError {
  /// The book identifier does not resolve to a canonical code
  #[error("unknown book: {identifier}")]
  UnknownBook {
    /// Identifier as given by the caller
    identifier: String,
  },

  /// The reference could not be parsed (empty book, non-positive chapter or verse)
  #[error("invalid reference format: {reason}")]
  InvalidFormat {
    /// Parse failure detail
    reason: String,
  },

  /// The book resolves but the store holds no tokens for the chapter/verse
  #[error("no tokens found for {reference}")]
  NoTokens {
    /// Human-readable reference, e.g. "Genesis 99:99"
    reference: String,
  },
}

/// Storage layer errors
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum StoreError {
  /// The database file could not be opened
  #[error("failed to open token store: path={path:?}, error={source}")]
  Open {
    /// Database path
    path: PathBuf,
    /// Underlying SQLite error
    #[source]
    source: Arc<rusqlite::Error>,
  },

  /// A statement failed to prepare or execute
  #[error("token store query failed: {0}")]
  Query(Arc<rusqlite::Error>),
}

impl From<rusqlite::Error> for StoreError {
  fn from(err: rusqlite::Error) -> Self {
    Self::Query(Arc::new(err))
  }
}

/// Errors raised by the offline seeding step
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SeedError {
  /// The CSV input does not exist
  #[error("CSV not found: {0:?}")]
  CsvNotFound(PathBuf),

  /// The CSV header lacks required columns
  #[error("CSV missing required columns: {0:?}")]
  MissingColumns(Vec<String>),

  /// The CSV reader failed (IO or framing error)
  #[error("CSV read error: {0}")]
  Csv(Arc<csv::Error>),

  /// A schema or insert statement failed
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl From<csv::Error> for SeedError {
  fn from(err: csv::Error) -> Self {
    Self::Csv(Arc::new(err))
  }
}

impl From<rusqlite::Error> for SeedError {
  fn from(err: rusqlite::Error) -> Self {
    Self::Store(StoreError::from(err))
  }
}

/// Aggregate error
/// Public APIs of this crate return this error
/// Use as `InterlinearResult<T>` = `Result<T, InterlinearError>`
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InterlinearError {
  /// Book catalog errors
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  /// Reference resolution errors
  #[error(transparent)]
  Reference(#[from] ReferenceError),

  /// Storage errors
  #[error(transparent)]
  Store(#[from] StoreError),

  /// Seeding errors
  #[error(transparent)]
  Seed(#[from] SeedError),
}

/// Standard Result alias for the interlinear crate
pub type InterlinearResult<T> = Result<T, InterlinearError>;
