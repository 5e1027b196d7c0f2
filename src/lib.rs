//! Notification center: a small axum service that stores and serves user
//! notifications, plus the renderer that turns the notification list into
//! an HTML list with "Mark as Read" links.

pub mod auth;
pub mod db;
pub mod error;
pub mod middleware;
pub mod notification;
pub mod renderer;
pub mod routes;
pub mod state;

pub use error::{AppError, Result};
pub use routes::create_router;
pub use state::{AppState, Config};
