//! Model module

mod request;
mod response;

pub use request::VersePath;
pub use response::{BookDto, BooksResponse, HealthResponse, InterlinearResponse, TokenDto};
