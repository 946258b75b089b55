//! SQLite schema for the token table

use rusqlite::Connection;

use crate::errors::StoreError;

/// Data columns of the `tokens` table, in insert/select order
pub const TOKEN_COLUMNS: [&str; 10] = [
  "book_code",
  "chapter",
  "verse",
  "token_index",
  "surface",
  "lemma",
  "translit",
  "gloss",
  "morph",
  "strong",
];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tokens (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_code TEXT NOT NULL,
    chapter INTEGER NOT NULL,
    verse INTEGER NOT NULL,
    token_index INTEGER NOT NULL,
    surface TEXT NOT NULL,
    lemma TEXT,
    translit TEXT,
    gloss TEXT,
    morph TEXT,
    strong TEXT
);
CREATE INDEX IF NOT EXISTS idx_ref ON tokens(book_code, chapter, verse);
";

/// Creates the `tokens` table and its reference index if missing
///
/// Safe to run repeatedly.
///
/// # Errors
/// `StoreError::Query` if the batch fails
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
  // journal_mode answers with a row, so it cannot go through execute_batch
  conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
  conn.execute_batch(SCHEMA)?;
  Ok(())
}
