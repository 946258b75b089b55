//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{get_interlinear_verse, health_check, list_books};
pub use routes::{create_router, run_server};
pub use state::AppState;
