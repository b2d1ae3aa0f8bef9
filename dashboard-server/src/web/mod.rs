//! Web layer for the rail dashboard.
//!
//! Serves the dashboard page, card fragments and a JSON API over the
//! shared session.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
