//! Config loading from environment variables

use std::path::PathBuf;

use super::constants::{DEFAULT_BIND_ADDR, DEFAULT_BOOK_CODES_PATH, DEFAULT_DB_PATH};
use crate::errors::ApiError;

/// Database path variable
const ENV_DB: &str = "INTERLINEAR_DB";
/// Book catalog path variable
const ENV_BOOK_CODES: &str = "INTERLINEAR_BOOK_CODES";
/// Bind address variable
const ENV_BIND_ADDR: &str = "INTERLINEAR_API_BIND_ADDR";

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:8000")
  pub bind_addr: String,
  /// SQLite database holding the `tokens` table
  pub db_path: PathBuf,
  /// Book catalog JSON side file
  pub book_codes_path: PathBuf,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if a variable is set to a blank value
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through an arbitrary variable lookup
  ///
  /// Unset variables fall back to the defaults in [`super::constants`].
  ///
  /// # Errors
  /// Returns an error if a variable is set to a blank value
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::errors::Result<Self> {
    let read = |key: &str, default: &str| -> crate::errors::Result<String> {
      match lookup(key) {
        Some(value) if value.trim().is_empty() => {
          Err(ApiError::config(format!("{key} is set but empty")))
        }
        Some(value) => Ok(value.trim().to_string()),
        None => Ok(default.to_string()),
      }
    };

    Ok(Self {
      bind_addr: read(ENV_BIND_ADDR, DEFAULT_BIND_ADDR)?,
      db_path: PathBuf::from(read(ENV_DB, DEFAULT_DB_PATH)?),
      book_codes_path: PathBuf::from(read(ENV_BOOK_CODES, DEFAULT_BOOK_CODES_PATH)?),
    })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::errors::ApiErrorKind;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
      pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn defaults_when_unset() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    assert_eq!(config.book_codes_path, PathBuf::from(DEFAULT_BOOK_CODES_PATH));
  }

  #[test]
  fn overrides_from_variables() {
    let config = Config::from_lookup(lookup_from(&[
      ("INTERLINEAR_DB", "/srv/interlinear.sqlite3"),
      ("INTERLINEAR_BOOK_CODES", "/srv/book_codes.json"),
      ("INTERLINEAR_API_BIND_ADDR", " 0.0.0.0:9000 "),
    ]))
    .unwrap();

    assert_eq!(config.db_path, PathBuf::from("/srv/interlinear.sqlite3"));
    assert_eq!(config.book_codes_path, PathBuf::from("/srv/book_codes.json"));
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
  }

  #[test]
  fn blank_value_is_config_error() {
    let err = Config::from_lookup(lookup_from(&[("INTERLINEAR_DB", "  ")])).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Config);
    assert!(err.to_string().contains("INTERLINEAR_DB"));
  }
}
