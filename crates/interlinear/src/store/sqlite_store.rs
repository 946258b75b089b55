//! SQLite-backed token store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{Connection, OpenFlags, Row, params};
use tracing::debug;

use super::TokenStore;
use crate::books::BookCode;
use crate::errors::StoreError;
use crate::models::Token;

const VERSE_TOKENS_SQL: &str = "
SELECT book_code, chapter, verse, token_index, surface, lemma, translit, gloss, morph, strong
FROM tokens
WHERE book_code = ?1 AND chapter = ?2 AND verse = ?3
ORDER BY token_index ASC
";

const BOOK_CODES_SQL: &str = "SELECT DISTINCT book_code FROM tokens ORDER BY book_code";

/// Token store reading from a SQLite file
///
/// A fresh read-only connection is opened per call, so the store holds no mutable state and
/// can be shared freely between requests.
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
  path: PathBuf,
}

impl SqliteTokenStore {
  /// Creates a store for the database at `path`
  ///
  /// The file is not touched until the first query.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Database file path
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Whether the database file exists
  pub fn exists(&self) -> bool {
    self.path.is_file()
  }

  /// Opens a read-only connection
  ///
  /// A missing file is an error (no database is created).
  fn open(&self) -> Result<Connection, StoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
      | OpenFlags::SQLITE_OPEN_NO_MUTEX
      | OpenFlags::SQLITE_OPEN_URI;

    Connection::open_with_flags(&self.path, flags)
      .map_err(|e| StoreError::Open { path: self.path.clone(), source: Arc::new(e) })
  }
}

/// Maps one `tokens` row to a typed record; NULL text columns become empty strings
fn token_from_row(row: &Row<'_>) -> rusqlite::Result<Token> {
  let text = |idx: usize| -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
  };

  Ok(Token {
    book_code: BookCode::new(row.get::<_, String>(0)?),
    chapter: row.get(1)?,
    verse: row.get(2)?,
    token_index: row.get(3)?,
    surface: text(4)?,
    lemma: text(5)?,
    translit: text(6)?,
    gloss: text(7)?,
    morph: text(8)?,
    strong: text(9)?,
  })
}

impl TokenStore for SqliteTokenStore {
  fn verse_tokens(
    &self,
    book_code: &BookCode,
    chapter: u32,
    verse: u32,
  ) -> Result<Vec<Token>, StoreError> {
    let conn = self.open()?;
    let mut stmt = conn.prepare(VERSE_TOKENS_SQL)?;

    let tokens = stmt
      .query_map(params![book_code.as_str(), chapter, verse], token_from_row)?
      .collect::<Result<Vec<_>, _>>()?;

    debug!(%book_code, chapter, verse, token_count = tokens.len(), "verse tokens loaded");
    Ok(tokens)
  }

  fn book_codes(&self) -> Result<Vec<BookCode>, StoreError> {
    let conn = self.open()?;
    let mut stmt = conn.prepare(BOOK_CODES_SQL)?;

    let codes = stmt
      .query_map([], |row| row.get::<_, String>(0))?
      .map(|code| code.map(BookCode::new))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(codes)
  }
}
