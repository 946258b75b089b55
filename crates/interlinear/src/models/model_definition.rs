//! Data Model Definition
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::books::BookCode;
use crate::errors::ReferenceError;

/// One word or morphological unit of a verse
///
/// Mapped from a `tokens` row at the store boundary; nothing past the store sees untyped rows.
/// Within one `(book_code, chapter, verse)` group, `token_index` values are distinct and their
/// ascending order is reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
  /// Canonical book code
  pub book_code: BookCode,
  /// Chapter number (1-based)
  pub chapter: u32,
  /// Verse number (1-based)
  pub verse: u32,
  /// Position within the verse (1-based)
  pub token_index: u32,
  /// Original-script text
  pub surface: String,
  /// Dictionary headword
  pub lemma: String,
  /// Transliteration
  pub translit: String,
  /// Short English sense
  pub gloss: String,
  /// Morphology code
  pub morph: String,
  /// Strong's number
  pub strong: String,
}

/// A verse reference as supplied by a caller, before the book is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
  /// Book identifier as given (code or full name, any case)
  pub book: String,
  /// Chapter number
  ///
  /// May exceed the range of stored chapters; such references simply have no tokens.
  pub chapter: u64,
  /// Verse number
  pub verse: u64,
}

impl VerseReference {
  /// Creates a reference from already-validated numbers
  pub fn new(book: impl Into<String>, chapter: u64, verse: u64) -> Self {
    Self { book: book.into(), chapter, verse }
  }

  /// Parses raw path segments
  ///
  /// # Errors
  /// `InvalidFormat` if `chapter` or `verse` is not a positive integer
  pub fn parse(book: &str, chapter: &str, verse: &str) -> Result<Self, ReferenceError> {
    Ok(Self {
      book: book.to_string(),
      chapter: parse_positive("chapter", chapter)?,
      verse: parse_positive("verse", verse)?,
    })
  }
}

/// Parses a strictly positive decimal integer (digits only, no sign or whitespace)
///
/// Values too large for `u64` saturate to `u64::MAX`; they are still positive integers and
/// match no stored verse.
fn parse_positive(field: &str, raw: &str) -> Result<u64, ReferenceError> {
  let invalid = || ReferenceError::InvalidFormat {
    reason: format!("{field} must be a positive integer, got {raw:?}"),
  };

  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return Err(invalid());
  }
  if raw.bytes().all(|b| b == b'0') {
    return Err(invalid());
  }

  // digits only and non-zero, so the only possible failure is overflow
  Ok(raw.parse::<u64>().unwrap_or(u64::MAX))
}

/// A verse reference whose book has been resolved to a canonical code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedReference {
  /// Canonical book code
  pub book_code: BookCode,
  /// Display name of the book
  pub book_name: String,
  /// Chapter number
  pub chapter: u64,
  /// Verse number
  pub verse: u64,
}

impl ResolvedReference {
  /// Chapter and verse as stored in the token table
  ///
  /// `None` when either number is beyond the stored range, i.e. no token can match.
  pub fn stored_position(&self) -> Option<(u32, u32)> {
    Some((u32::try_from(self.chapter).ok()?, u32::try_from(self.verse).ok()?))
  }

  /// Human-readable label, e.g. `"Genesis 1:1"`
  pub fn label(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for ResolvedReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}:{}", self.book_name, self.chapter, self.verse)
  }
}

/// A book present in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
  /// Canonical book code
  pub code: BookCode,
  /// Display name (the code itself when the catalog does not know it)
  pub name: String,
}
