//! Store module
//!
//! [`TokenStore`] is the seam between the lookup path and the backing table.
//! [`SqliteTokenStore`] is the production implementation.

mod schema;
mod sqlite_store;

pub use schema::{TOKEN_COLUMNS, ensure_schema};
pub use sqlite_store::SqliteTokenStore;

use crate::books::BookCode;
use crate::errors::StoreError;
use crate::models::Token;

/// Read-only access to the token table
pub trait TokenStore: Send + Sync {
  /// Returns every token of one verse, ordered by `token_index` ascending
  ///
  /// A reference with no rows yields an empty `Vec`, never an error.
  ///
  /// # Errors
  /// `StoreError` if the store cannot be opened or queried
  fn verse_tokens(
    &self,
    book_code: &BookCode,
    chapter: u32,
    verse: u32,
  ) -> Result<Vec<Token>, StoreError>;

  /// Returns the distinct book codes present in the store, ordered by code
  ///
  /// # Errors
  /// `StoreError` if the store cannot be opened or queried
  fn book_codes(&self) -> Result<Vec<BookCode>, StoreError>;
}
