//! Config module

mod constants;
mod env;

pub use constants::{DEFAULT_BIND_ADDR, DEFAULT_BOOK_CODES_PATH, DEFAULT_DB_PATH};
pub use env::Config;
