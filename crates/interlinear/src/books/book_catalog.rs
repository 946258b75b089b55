//! Book catalog: canonical codes, display names and the alias table used by the resolver

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, ReferenceError};

/// Canonical book code (e.g. `GEN`, `1SA`)
///
/// Always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookCode(String);

impl BookCode {
  /// Creates a code, trimming whitespace and uppercasing
  pub fn new(code: impl AsRef<str>) -> Self {
    Self(code.as_ref().trim().to_uppercase())
  }

  /// Returns the code as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for BookCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Catalog used when no side file is present
const BUILTIN_BOOKS: &[(&str, &str)] = &[
  ("GEN", "Genesis"),
  ("EXO", "Exodus"),
  ("LEV", "Leviticus"),
  ("NUM", "Numbers"),
  ("DEU", "Deuteronomy"),
  ("JOS", "Joshua"),
  ("JDG", "Judges"),
  ("RUT", "Ruth"),
  ("1SA", "1 Samuel"),
  ("2SA", "2 Samuel"),
  ("1KI", "1 Kings"),
  ("2KI", "2 Kings"),
  ("1CH", "1 Chronicles"),
  ("2CH", "2 Chronicles"),
  ("EZR", "Ezra"),
  ("NEH", "Nehemiah"),
  ("EST", "Esther"),
  ("JOB", "Job"),
  ("PSA", "Psalms"),
  ("PRO", "Proverbs"),
  ("ECC", "Ecclesiastes"),
  ("SNG", "Song of Solomon"),
  ("ISA", "Isaiah"),
  ("JER", "Jeremiah"),
  ("LAM", "Lamentations"),
  ("EZK", "Ezekiel"),
  ("DAN", "Daniel"),
  ("HOS", "Hosea"),
  ("JOL", "Joel"),
  ("AMO", "Amos"),
  ("OBA", "Obadiah"),
  ("JON", "Jonah"),
  ("MIC", "Micah"),
  ("NAM", "Nahum"),
  ("HAB", "Habakkuk"),
  ("ZEP", "Zephaniah"),
  ("HAG", "Haggai"),
  ("ZEC", "Zechariah"),
  ("MAL", "Malachi"),
  ("MAT", "Matthew"),
  ("MRK", "Mark"),
  ("LUK", "Luke"),
  ("JHN", "John"),
  ("ACT", "Acts"),
  ("ROM", "Romans"),
  ("1CO", "1 Corinthians"),
  ("2CO", "2 Corinthians"),
  ("GAL", "Galatians"),
  ("EPH", "Ephesians"),
  ("PHP", "Philippians"),
  ("COL", "Colossians"),
  ("1TH", "1 Thessalonians"),
  ("2TH", "2 Thessalonians"),
  ("1TI", "1 Timothy"),
  ("2TI", "2 Timothy"),
  ("TIT", "Titus"),
  ("PHM", "Philemon"),
  ("HEB", "Hebrews"),
  ("JAS", "James"),
  ("1PE", "1 Peter"),
  ("2PE", "2 Peter"),
  ("1JN", "1 John"),
  ("2JN", "2 John"),
  ("3JN", "3 John"),
  ("JUD", "Jude"),
  ("REV", "Revelation"),
];

/// One value of the side file, keyed by code.
///
/// Both `"GEN": "Genesis"` and `"GEN": {"name": "Genesis", "aliases": ["Gn"]}` are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
  Name(String),
  Detailed {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
  },
}

/// Immutable mapping between book identifiers and canonical codes.
///
/// Built once at startup and shared (behind `Arc`) by every request.
/// Every code maps to itself under lowercasing; display names and extra aliases are
/// additional keys for the same code.
#[derive(Debug, Clone)]
pub struct BookCatalog {
  /// code -> display name, ordered by code
  names: BTreeMap<BookCode, String>,
  /// lowercase identifier -> code
  aliases: HashMap<String, BookCode>,
}

impl BookCatalog {
  /// Builds a catalog from `(code, name, extra aliases)` triples
  ///
  /// # Errors
  /// - `InvalidEntry` if a code or name is blank, or the code is not ASCII alphanumeric
  /// - `DuplicateAlias` if two codes claim the same identifier
  /// - `Empty` if no entries are given
  pub fn from_entries<I, A>(entries: I) -> Result<Self, CatalogError>
  where
    I: IntoIterator<Item = (String, String, A)>,
    A: IntoIterator<Item = String>,
  {
    let mut names = BTreeMap::new();
    let mut aliases: HashMap<String, BookCode> = HashMap::new();

    for (raw_code, raw_name, extra) in entries {
      let code = BookCode::new(&raw_code);
      if code.as_str().is_empty() || !code.as_str().chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CatalogError::InvalidEntry {
          code: raw_code,
          reason: "code must be non-empty ASCII alphanumeric".to_string(),
        });
      }

      let name = raw_name.trim().to_string();
      if name.is_empty() {
        return Err(CatalogError::InvalidEntry {
          code: raw_code,
          reason: "display name is empty".to_string(),
        });
      }

      let keys = std::iter::once(code.as_str().to_string())
        .chain(std::iter::once(name.clone()))
        .chain(extra)
        .map(|alias| alias.trim().to_lowercase())
        .filter(|alias| !alias.is_empty());

      for alias in keys {
        match aliases.entry(alias) {
          Entry::Occupied(entry) if *entry.get() != code => {
            return Err(CatalogError::DuplicateAlias {
              alias: entry.key().clone(),
              first: entry.get().to_string(),
              second: code.to_string(),
            });
          }
          Entry::Occupied(_) => {}
          Entry::Vacant(entry) => {
            entry.insert(code.clone());
          }
        }
      }

      names.insert(code, name);
    }

    if names.is_empty() {
      return Err(CatalogError::Empty);
    }

    Ok(Self { names, aliases })
  }

  /// The 66-book Protestant canon with English display names
  ///
  /// Built directly from the static table: each code and each lowercased name is an alias.
  pub fn builtin() -> Self {
    let mut names = BTreeMap::new();
    let mut aliases = HashMap::with_capacity(BUILTIN_BOOKS.len() * 2);

    for (code, name) in BUILTIN_BOOKS {
      let code = BookCode::new(code);
      aliases.insert(code.as_str().to_lowercase(), code.clone());
      aliases.insert(name.to_lowercase(), code.clone());
      names.insert(code, (*name).to_string());
    }

    Self { names, aliases }
  }

  /// Parses the JSON side file format
  ///
  /// # Errors
  /// Returns `Parse` for malformed JSON and any error of [`BookCatalog::from_entries`]
  pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
    let raw: BTreeMap<String, CatalogEntry> =
      serde_json::from_str(json).map_err(|e| CatalogError::Parse { source: Arc::new(e) })?;

    Self::from_entries(raw.into_iter().map(|(code, entry)| match entry {
      CatalogEntry::Name(name) => (code, name, Vec::new()),
      CatalogEntry::Detailed { name, aliases } => (code, name, aliases),
    }))
  }

  /// Loads the catalog from a JSON file
  ///
  /// # Errors
  /// Returns `Read` if the file cannot be read, otherwise as [`BookCatalog::from_json_str`]
  pub fn load(path: &Path) -> Result<Self, CatalogError> {
    let json = std::fs::read_to_string(path)
      .map_err(|e| CatalogError::Read { path: path.to_path_buf(), source: Arc::new(e) })?;
    Self::from_json_str(&json)
  }

  /// Loads the catalog from a JSON file, using [`BookCatalog::builtin`] if the file does not exist
  ///
  /// A file that exists but cannot be parsed is still an error.
  ///
  /// # Errors
  /// As [`BookCatalog::load`], except for a missing file
  pub fn load_or_builtin(path: &Path) -> Result<Self, CatalogError> {
    match Self::load(path) {
      Err(CatalogError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
        tracing::warn!(path = %path.display(), "book catalog not found, using built-in catalog");
        Ok(Self::builtin())
      }
      other => other,
    }
  }

  /// Resolves a code, display name or alias (case-insensitive) to its canonical code
  ///
  /// # Errors
  /// - `InvalidFormat` if the identifier is blank
  /// - `UnknownBook` if no entry matches
  pub fn resolve(&self, identifier: &str) -> Result<&BookCode, ReferenceError> {
    let key = identifier.trim().to_lowercase();
    if key.is_empty() {
      return Err(ReferenceError::InvalidFormat { reason: "book is required".to_string() });
    }

    self
      .aliases
      .get(&key)
      .ok_or_else(|| ReferenceError::UnknownBook { identifier: identifier.to_string() })
  }

  /// Display name of a canonical code, if the catalog knows it
  pub fn display_name(&self, code: &BookCode) -> Option<&str> {
    self.names.get(code).map(String::as_str)
  }

  /// All codes with their display names, ordered by code
  pub fn iter(&self) -> impl Iterator<Item = (&BookCode, &str)> {
    self.names.iter().map(|(code, name)| (code, name.as_str()))
  }

  /// Number of books
  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// Whether the catalog has no books
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn builtin_catalog_has_66_books() {
    let catalog = BookCatalog::builtin();
    assert_eq!(catalog.len(), 66);
    assert_eq!(catalog.display_name(&BookCode::new("GEN")), Some("Genesis"));
    assert_eq!(catalog.display_name(&BookCode::new("REV")), Some("Revelation"));
  }

  #[test]
  fn builtin_table_passes_entry_validation() {
    let validated = BookCatalog::from_entries(
      BUILTIN_BOOKS
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string(), Vec::<String>::new())),
    )
    .unwrap();
    let builtin = BookCatalog::builtin();

    assert_eq!(validated.names, builtin.names);
    assert_eq!(validated.aliases, builtin.aliases);
  }

  #[test]
  fn every_code_resolves_to_itself() {
    let catalog = BookCatalog::builtin();
    for (code, _) in catalog.iter() {
      assert_eq!(catalog.resolve(code.as_str()).unwrap(), code);
    }
  }

  #[test]
  fn case_variants_resolve_identically() {
    let catalog = BookCatalog::builtin();
    let expected = BookCode::new("GEN");

    for id in ["GEN", "gen", "Gen", "gEn", "Genesis", "genesis", "GENESIS", "  genesis "] {
      assert_eq!(catalog.resolve(id).unwrap(), &expected, "identifier {id:?}");
    }
  }

  #[test]
  fn multi_word_names_resolve() {
    let catalog = BookCatalog::builtin();
    assert_eq!(catalog.resolve("song of solomon").unwrap().as_str(), "SNG");
    assert_eq!(catalog.resolve("1 Samuel").unwrap().as_str(), "1SA");
    assert_eq!(catalog.resolve("1sa").unwrap().as_str(), "1SA");
  }

  #[test]
  fn unknown_identifier_is_typed_failure() {
    let catalog = BookCatalog::builtin();

    let err = catalog.resolve("XXX").unwrap_err();
    assert_eq!(err, ReferenceError::UnknownBook { identifier: "XXX".to_string() });

    // no prefix guessing
    assert!(catalog.resolve("Genesi").is_err());
  }

  #[test]
  fn blank_identifier_is_invalid_format() {
    let catalog = BookCatalog::builtin();
    assert!(matches!(catalog.resolve("   "), Err(ReferenceError::InvalidFormat { .. })));
  }

  #[test]
  fn json_accepts_plain_and_detailed_entries() {
    let json = r#"{
      "gen": "Genesis",
      "EXO": {"name": "Exodus", "aliases": ["Ex", "Exod"]}
    }"#;
    let catalog = BookCatalog::from_json_str(json).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.resolve("GEN").unwrap().as_str(), "GEN");
    assert_eq!(catalog.resolve("exod").unwrap().as_str(), "EXO");
    assert_eq!(catalog.display_name(&BookCode::new("EXO")), Some("Exodus"));
  }

  #[test]
  fn json_rejects_duplicate_alias() {
    let json = r#"{
      "GEN": {"name": "Genesis", "aliases": ["first"]},
      "EXO": {"name": "Exodus", "aliases": ["First"]}
    }"#;
    let err = BookCatalog::from_json_str(json).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateAlias { alias, .. } if alias == "first"));
  }

  #[test]
  fn json_rejects_blank_name_and_bad_code() {
    assert!(matches!(
      BookCatalog::from_json_str(r#"{"GEN": "  "}"#),
      Err(CatalogError::InvalidEntry { .. })
    ));
    assert!(matches!(
      BookCatalog::from_json_str(r#"{"G N": "Genesis"}"#),
      Err(CatalogError::InvalidEntry { .. })
    ));
  }

  #[test]
  fn json_rejects_empty_and_malformed() {
    assert!(matches!(BookCatalog::from_json_str("{}"), Err(CatalogError::Empty)));
    assert!(matches!(BookCatalog::from_json_str("[1, 2]"), Err(CatalogError::Parse { .. })));
  }

  #[test]
  fn load_or_builtin_falls_back_only_when_missing() {
    let temp_dir = TempDir::new().unwrap();

    let missing = temp_dir.path().join("missing.json");
    let catalog = BookCatalog::load_or_builtin(&missing).unwrap();
    assert_eq!(catalog.len(), 66);

    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(BookCatalog::load_or_builtin(&broken), Err(CatalogError::Parse { .. })));

    let custom = temp_dir.path().join("books.json");
    fs::write(&custom, r#"{"GEN": {"name": "Genesis"}}"#).unwrap();
    assert_eq!(BookCatalog::load_or_builtin(&custom).unwrap().len(), 1);
  }
}
