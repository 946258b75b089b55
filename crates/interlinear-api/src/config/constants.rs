//! API configuration constants

/// Default bind address
///
/// localhost only; override with `INTERLINEAR_API_BIND_ADDR` to expose the server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default SQLite database path (relative to the working directory)
pub const DEFAULT_DB_PATH: &str = "interlinear.sqlite3";

/// Default book catalog side file
///
/// The built-in catalog is used when this file does not exist.
pub const DEFAULT_BOOK_CODES_PATH: &str = "data/book_codes.json";
