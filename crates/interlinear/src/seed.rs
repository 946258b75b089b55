//! Offline seeding of the token table from a normalized CSV
//!
//! The serving path never writes; this module backs the `interlinear-seed` binary and the
//! test fixtures.
//!
//! Expected header (any column order, extra columns ignored):
//! `book_code,chapter,verse,token_index,surface,lemma,translit,gloss,morph,strong`

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use rusqlite::{Connection, params};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::books::BookCode;
use crate::errors::SeedError;
use crate::models::Token;
use crate::store::{TOKEN_COLUMNS, ensure_schema};

const INSERT_SQL: &str = "
INSERT INTO tokens (book_code, chapter, verse, token_index, surface, lemma, translit, gloss, morph, strong)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
";

/// Default number of rows per insert transaction
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

/// Seeding options
#[derive(Debug, Clone)]
pub struct SeedOptions {
  /// Keep existing rows instead of clearing the table first
  pub append: bool,
  /// Rows per transaction (values below 1 are treated as 1)
  pub batch_size: usize,
  /// Run `VACUUM` after inserting
  pub vacuum: bool,
}

impl Default for SeedOptions {
  fn default() -> Self {
    Self { append: false, batch_size: DEFAULT_BATCH_SIZE, vacuum: false }
  }
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
  /// Rows written
  pub inserted: usize,
  /// Rows skipped because they were malformed or rejected by the database
  pub skipped: usize,
}

/// A CSV record before coercion; every field is raw text
#[derive(Debug, Deserialize)]
struct RawTokenRecord {
  book_code: String,
  chapter: String,
  verse: String,
  token_index: String,
  surface: String,
  #[serde(default)]
  lemma: String,
  #[serde(default)]
  translit: String,
  #[serde(default)]
  gloss: String,
  #[serde(default)]
  morph: String,
  #[serde(default)]
  strong: String,
}

impl RawTokenRecord {
  /// Coerces one record to a [`Token`]
  ///
  /// Numbers must parse as positive integers; `book_code` and `surface` must be non-empty.
  fn into_token(self) -> Result<Token, String> {
    let number = |field: &str, raw: &str| -> Result<u32, String> {
      match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("bad numeric field {field}={raw:?}")),
      }
    };

    let token = Token {
      book_code: BookCode::new(&self.book_code),
      chapter: number("chapter", &self.chapter)?,
      verse: number("verse", &self.verse)?,
      token_index: number("token_index", &self.token_index)?,
      surface: self.surface.trim().to_string(),
      lemma: self.lemma.trim().to_string(),
      translit: self.translit.trim().to_string(),
      gloss: self.gloss.trim().to_string(),
      morph: self.morph.trim().to_string(),
      strong: self.strong.trim().to_string(),
    };

    if token.book_code.as_str().is_empty() || token.surface.is_empty() {
      return Err("missing book_code or surface".to_string());
    }

    Ok(token)
  }
}

/// Seeds `db_path` from the CSV at `csv_path`
///
/// Creates the database and schema if needed.
///
/// # Errors
/// - `CsvNotFound` if the CSV does not exist
/// - `MissingColumns` if the header lacks required columns
/// - `Csv` / `Store` on IO or SQLite failures, including a batch whose every row is rejected
///
/// Existing rows are only cleared once the header has been validated.
pub fn seed_from_csv(
  csv_path: &Path,
  db_path: &Path,
  options: &SeedOptions,
) -> Result<SeedReport, SeedError> {
  if !csv_path.is_file() {
    return Err(SeedError::CsvNotFound(csv_path.to_path_buf()));
  }

  let mut conn = Connection::open(db_path)?;
  // bulk-load pragmas
  conn.execute_batch("PRAGMA synchronous=OFF; PRAGMA temp_store=MEMORY;")?;

  info!(csv = %csv_path.display(), db = %db_path.display(), "seeding token table");
  let file = std::fs::File::open(csv_path)
    .map_err(|e| SeedError::Csv(Arc::new(csv::Error::from(e))))?;
  let report = seed_from_reader(&mut conn, file, options)?;

  if options.vacuum {
    info!("running VACUUM");
    conn.execute_batch("VACUUM;")?;
  }

  Ok(report)
}

/// Seeds an open connection from any CSV reader
///
/// # Errors
/// As [`seed_from_csv`], minus the file checks
pub fn seed_from_reader<R: Read>(
  conn: &mut Connection,
  reader: R,
  options: &SeedOptions,
) -> Result<SeedReport, SeedError> {
  let mut csv_reader =
    csv::ReaderBuilder::new().trim(csv::Trim::Headers).flexible(false).from_reader(reader);

  let headers = csv_reader.headers()?.clone();
  let missing: Vec<String> = TOKEN_COLUMNS
    .iter()
    .filter(|column| !headers.iter().any(|h| h == **column))
    .map(|column| (*column).to_string())
    .collect();
  if !missing.is_empty() {
    return Err(SeedError::MissingColumns(missing));
  }

  // the header is known good; only now may existing rows go
  ensure_schema(conn)?;
  if !options.append {
    info!("clearing existing rows in tokens");
    conn.execute("DELETE FROM tokens", [])?;
  }

  let batch_size = options.batch_size.max(1);
  let mut report = SeedReport::default();
  let mut batch: Vec<Token> = Vec::with_capacity(batch_size.min(DEFAULT_BATCH_SIZE));

  for (line, record) in csv_reader.deserialize::<RawTokenRecord>().enumerate() {
    let token = match record {
      Ok(raw) => raw.into_token(),
      Err(err) if err.is_io_error() => return Err(err.into()),
      Err(err) => Err(err.to_string()),
    };

    match token {
      Ok(token) => batch.push(token),
      Err(reason) => {
        // +2: 1-based, header on line 1
        warn!(line = line + 2, %reason, "skipping malformed row");
        report.skipped += 1;
      }
    }

    if batch.len() >= batch_size {
      flush_batch(conn, &mut batch, &mut report)?;
    }
  }
  flush_batch(conn, &mut batch, &mut report)?;

  info!(inserted = report.inserted, skipped = report.skipped, "seeding finished");
  Ok(report)
}

/// Inserts tokens in one transaction, without clearing the table
///
/// # Errors
/// `Store` if the schema cannot be created or any insert fails (nothing is written then)
pub fn insert_tokens(conn: &mut Connection, tokens: &[Token]) -> Result<(), SeedError> {
  ensure_schema(conn)?;
  insert_batch(conn, tokens)?;
  Ok(())
}

/// Opens (or creates) the database at `db_path` and appends tokens in one transaction
///
/// # Errors
/// As [`insert_tokens`]
pub fn append_tokens(db_path: &Path, tokens: &[Token]) -> Result<(), SeedError> {
  let mut conn = Connection::open(db_path)?;
  insert_tokens(&mut conn, tokens)
}

fn insert_batch(conn: &mut Connection, tokens: &[Token]) -> rusqlite::Result<()> {
  let tx = conn.transaction()?;
  {
    let mut stmt = tx.prepare_cached(INSERT_SQL)?;
    for token in tokens {
      insert_one(&mut stmt, token)?;
    }
  }
  tx.commit()
}

fn insert_one(stmt: &mut rusqlite::CachedStatement<'_>, token: &Token) -> rusqlite::Result<()> {
  stmt.execute(params![
    token.book_code.as_str(),
    token.chapter,
    token.verse,
    token.token_index,
    token.surface,
    token.lemma,
    token.translit,
    token.gloss,
    token.morph,
    token.strong,
  ])?;
  Ok(())
}

/// Writes the pending batch; if the transaction fails, retries row by row and counts rejects
fn flush_batch(
  conn: &mut Connection,
  batch: &mut Vec<Token>,
  report: &mut SeedReport,
) -> Result<(), SeedError> {
  if batch.is_empty() {
    return Ok(());
  }

  match insert_batch(conn, batch) {
    Ok(()) => {
      report.inserted += batch.len();
      debug!(inserted = report.inserted, "batch committed");
    }
    Err(err) => {
      warn!(error = %err, rows = batch.len(), "batch insert failed, retrying row by row");
      let mut stmt = conn.prepare_cached(INSERT_SQL)?;
      let mut batch_inserted = 0;
      let mut last_error = None;
      for token in batch.iter() {
        match insert_one(&mut stmt, token) {
          Ok(()) => batch_inserted += 1,
          Err(row_err) => {
            warn!(
              book_code = %token.book_code,
              chapter = token.chapter,
              verse = token.verse,
              token_index = token.token_index,
              error = %row_err,
              "row rejected by database"
            );
            report.skipped += 1;
            last_error = Some(row_err);
          }
        }
      }
      report.inserted += batch_inserted;

      // nothing in the batch went in: the database itself is failing, not individual rows
      if let (0, Some(row_err)) = (batch_inserted, last_error) {
        return Err(row_err.into());
      }
    }
  }

  batch.clear();
  Ok(())
}
