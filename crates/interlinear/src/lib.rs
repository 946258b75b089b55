//! interlinear: word-by-word Bible annotation lookup
//!
//! Resolves human-supplied book identifiers to canonical codes and reads the
//! ordered token rows of a single verse from a SQLite store.

/// Book catalog module - canonical book codes, display names and alias resolution
pub mod books;

/// Error module - InterlinearError, InterlinearResult and component errors
pub mod errors;

/// Data model module - Token, VerseReference, ResolvedReference
pub mod models;

/// Seeding module - offline CSV loader for the token table
pub mod seed;

/// Service module - resolve + lookup facade used by the HTTP layer
pub mod service;

/// Store module - TokenStore trait and its SQLite implementation
pub mod store;

/// Re-exports
pub use books::{BookCatalog, BookCode};
pub use errors::{InterlinearError, InterlinearResult};
pub use models::{ResolvedReference, Token, VerseReference};
pub use service::{InterlinearService, VerseTokens};
pub use store::{SqliteTokenStore, TokenStore};
