//! Data model module

mod model_definition;

pub use model_definition::{BookSummary, ResolvedReference, Token, VerseReference};
