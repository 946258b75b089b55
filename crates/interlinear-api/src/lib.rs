//! interlinear-api crate
//!
//! Web server exposing interlinear verse lookups as an HTTP API.
//!
//! ## Endpoints
//! - `GET /interlinear/{book}/{chapter}/{verse}` - Tokens of one verse
//! - `GET /books` - Books present in the store
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl http://127.0.0.1:8000/interlinear/genesis/1/1
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{BooksResponse, HealthResponse, InterlinearResponse, TokenDto};
pub use service::InterlinearApiServiceFull;
