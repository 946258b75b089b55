//! Service module

mod interlinear_api_service;

pub use interlinear_api_service::{InterlinearApiService, InterlinearApiServiceFull};
