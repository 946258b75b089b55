//! Request model definitions

use serde::Deserialize;

use interlinear::errors::ReferenceError;
use interlinear::models::VerseReference;

/// Path segments of `GET /interlinear/{book}/{chapter}/{verse}`
///
/// Kept as raw strings so that malformed numbers surface as `invalid_reference_format`
/// rather than the framework's generic path rejection.
#[derive(Debug, Deserialize)]
pub struct VersePath {
  /// Book code or full name
  pub book: String,
  /// Chapter, expected to be a positive integer
  pub chapter: String,
  /// Verse, expected to be a positive integer
  pub verse: String,
}

impl VersePath {
  /// Validates the numbers and builds a [`VerseReference`]
  ///
  /// # Errors
  /// `InvalidFormat` if chapter or verse is not a positive integer
  pub fn to_reference(&self) -> Result<VerseReference, ReferenceError> {
    VerseReference::parse(&self.book, &self.chapter, &self.verse)
  }
}
