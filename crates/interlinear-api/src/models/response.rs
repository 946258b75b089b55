//! Response Model Definition

use serde::{Deserialize, Serialize};

use interlinear::models::{BookSummary, ResolvedReference, Token};

/// Interlinear verse response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterlinearResponse {
  /// Human-readable reference, e.g. "Genesis 1:1"
  pub reference: String,
  /// Book display name
  pub book: String,
  /// Canonical book code
  pub book_code: String,
  /// Chapter number
  pub chapter: u64,
  /// Verse number
  pub verse: u64,
  /// Tokens in reading order
  pub tokens: Vec<TokenDto>,
}

/// Token Information (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDto {
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
  /// Position within the verse (1-based)
  pub index: u32,
}

impl From<Token> for TokenDto {
  fn from(token: Token) -> Self {
    Self {
      surface: token.surface,
      lemma: token.lemma,
      translit: token.translit,
      gloss: token.gloss,
      morph: token.morph,
      strong: token.strong,
      index: token.token_index,
    }
  }
}

impl InterlinearResponse {
  /// Assembles the response for a resolved reference
  ///
  /// Token order is preserved as given (the store returns reading order).
  #[must_use]
  pub fn assemble(reference: &ResolvedReference, tokens: Vec<Token>) -> Self {
    Self {
      reference: reference.label(),
      book: reference.book_name.clone(),
      book_code: reference.book_code.to_string(),
      chapter: reference.chapter,
      verse: reference.verse,
      tokens: tokens.into_iter().map(TokenDto::from).collect(),
    }
  }
}

/// `GET /books` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksResponse {
  /// Books present in the store, ordered by code
  pub books: Vec<BookDto>,
}

/// One entry of [`BooksResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDto {
  /// Canonical book code
  pub code: String,
  /// Display name
  pub name: String,
}

impl From<BookSummary> for BookDto {
  fn from(summary: BookSummary) -> Self {
    Self { code: summary.code.to_string(), name: summary.name }
  }
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
  /// Whether the database file exists
  pub ok: bool,
  /// Configured database path
  pub db: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use interlinear::BookCode;

  fn token(index: u32, surface: &str, strong: &str) -> Token {
    Token {
      book_code: BookCode::new("GEN"),
      chapter: 1,
      verse: 1,
      token_index: index,
      surface: surface.to_string(),
      lemma: format!("lemma{index}"),
      translit: format!("translit{index}"),
      gloss: format!("gloss{index}"),
      morph: format!("morph{index}"),
      strong: strong.to_string(),
    }
  }

  fn genesis_1_1() -> ResolvedReference {
    ResolvedReference {
      book_code: BookCode::new("GEN"),
      book_name: "Genesis".to_string(),
      chapter: 1,
      verse: 1,
    }
  }

  #[test]
  fn assemble_fills_header_fields() {
    let response = InterlinearResponse::assemble(&genesis_1_1(), vec![token(1, "a", "H7225")]);

    assert_eq!(response.reference, "Genesis 1:1");
    assert_eq!(response.book, "Genesis");
    assert_eq!(response.book_code, "GEN");
    assert_eq!(response.chapter, 1);
    assert_eq!(response.verse, 1);
    assert_eq!(response.tokens[0].index, 1);
  }

  #[test]
  fn serialized_tokens_match_source_rows_in_order() {
    let rows = vec![token(1, "a", "H7225"), token(2, "b", "H1254"), token(3, "c", "H430")];
    let response = InterlinearResponse::assemble(&genesis_1_1(), rows.clone());

    let json = serde_json::to_value(&response).unwrap();
    let parsed: Vec<TokenDto> = serde_json::from_value(json["tokens"].clone()).unwrap();

    assert_eq!(parsed.len(), rows.len());
    for (dto, row) in parsed.iter().zip(&rows) {
      assert_eq!(dto.surface, row.surface);
      assert_eq!(dto.lemma, row.lemma);
      assert_eq!(dto.translit, row.translit);
      assert_eq!(dto.gloss, row.gloss);
      assert_eq!(dto.morph, row.morph);
      assert_eq!(dto.strong, row.strong);
      assert_eq!(dto.index, row.token_index);
    }
  }

  #[test]
  fn response_json_field_names() {
    let response = InterlinearResponse::assemble(&genesis_1_1(), vec![token(1, "a", "H7225")]);
    let json = serde_json::to_value(&response).unwrap();

    for key in ["reference", "book", "book_code", "chapter", "verse", "tokens"] {
      assert!(json.get(key).is_some(), "missing {key}");
    }
    let token = &json["tokens"][0];
    for key in ["surface", "lemma", "translit", "gloss", "morph", "strong", "index"] {
      assert!(token.get(key).is_some(), "missing tokens[0].{key}");
    }
  }

  #[test]
  fn book_dto_from_summary() {
    let dto = BookDto::from(BookSummary { code: BookCode::new("JHN"), name: "John".to_string() });
    assert_eq!(dto, BookDto { code: "JHN".to_string(), name: "John".to_string() });
  }
}
