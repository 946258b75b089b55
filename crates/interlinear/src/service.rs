//! InterlinearService: resolve → lookup facade.
//!
//! - Book resolution (BookCatalog)
//! - Token lookup (TokenStore)
//!
//! The HTTP layer only needs this struct; assembling the wire response is left to it.

use std::sync::Arc;

use tracing::debug;

use crate::books::{BookCatalog, BookCode};
use crate::errors::{InterlinearResult, ReferenceError};
use crate::models::{BookSummary, ResolvedReference, Token, VerseReference};
use crate::store::TokenStore;

/// Tokens of one verse together with the resolved reference they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseTokens {
  /// Resolved reference
  pub reference: ResolvedReference,
  /// Tokens ordered by `token_index` ascending (never empty)
  pub tokens: Vec<Token>,
}

/// Facade over the book catalog and the token store
///
/// Cheap to clone; both parts are shared immutably.
#[derive(Clone)]
pub struct InterlinearService {
  catalog: Arc<BookCatalog>,
  store: Arc<dyn TokenStore>,
}

impl InterlinearService {
  /// Creates the service
  pub fn new(catalog: Arc<BookCatalog>, store: Arc<dyn TokenStore>) -> Self {
    Self { catalog, store }
  }

  /// Book catalog
  pub fn catalog(&self) -> &BookCatalog {
    &self.catalog
  }

  /// Resolves a book identifier to its canonical code
  ///
  /// # Errors
  /// `UnknownBook` / `InvalidFormat` as [`BookCatalog::resolve`]
  pub fn resolve_book(&self, identifier: &str) -> Result<BookCode, ReferenceError> {
    self.catalog.resolve(identifier).cloned()
  }

  /// Resolves the book of a reference and attaches its display name
  ///
  /// # Errors
  /// `UnknownBook` / `InvalidFormat` as [`BookCatalog::resolve`]
  pub fn resolve(&self, reference: &VerseReference) -> Result<ResolvedReference, ReferenceError> {
    let book_code = self.resolve_book(&reference.book)?;
    let book_name =
      self.catalog.display_name(&book_code).unwrap_or(book_code.as_str()).to_string();

    Ok(ResolvedReference {
      book_code,
      book_name,
      chapter: reference.chapter,
      verse: reference.verse,
    })
  }

  /// Tokens of one verse by canonical code; empty when nothing is stored
  ///
  /// # Errors
  /// `Store` on storage failures only
  pub fn lookup(
    &self,
    book_code: &BookCode,
    chapter: u32,
    verse: u32,
  ) -> InterlinearResult<Vec<Token>> {
    Ok(self.store.verse_tokens(book_code, chapter, verse)?)
  }

  /// Full verse pipeline: resolve the book, then fetch its tokens
  ///
  /// # Errors
  /// - `Reference(UnknownBook)` if the book does not resolve
  /// - `Reference(NoTokens)` if the book resolves but nothing is stored for the chapter/verse
  /// - `Store` on storage failures
  pub fn verse(&self, reference: &VerseReference) -> InterlinearResult<VerseTokens> {
    let resolved = self.resolve(reference)?;
    let tokens = match resolved.stored_position() {
      Some((chapter, verse)) => self.lookup(&resolved.book_code, chapter, verse)?,
      None => Vec::new(),
    };

    if tokens.is_empty() {
      debug!(reference = %resolved, "no tokens for reference");
      return Err(ReferenceError::NoTokens { reference: resolved.label() }.into());
    }

    Ok(VerseTokens { reference: resolved, tokens })
  }

  /// Books present in the store, with display names from the catalog
  ///
  /// # Errors
  /// `Store` on storage failures
  pub fn books(&self) -> InterlinearResult<Vec<BookSummary>> {
    let codes = self.store.book_codes()?;

    Ok(
      codes
        .into_iter()
        .map(|code| {
          let name = self.catalog.display_name(&code).unwrap_or(code.as_str()).to_string();
          BookSummary { code, name }
        })
        .collect(),
    )
  }
}
