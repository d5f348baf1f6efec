mod driver;
pub mod error;
pub mod export;
pub mod routes;
pub mod state;
pub mod ws;

use axum::Router;

pub use error::ApiError;
pub use state::{AppSettings, AppState, RuntimeEvent, SessionId};

pub fn app(state: AppState) -> Router {
    routes::router(state)
}
