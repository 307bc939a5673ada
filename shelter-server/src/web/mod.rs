//! Web layer for the shelter locator.
//!
//! Provides HTTP endpoints for locating the nearest shelter and for walking
//! routes, plus the index page that drives them.

mod dto;
mod routes;
mod session;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use session::{SessionError, SessionRegistry};
pub use state::AppState;
pub use templates::*;
