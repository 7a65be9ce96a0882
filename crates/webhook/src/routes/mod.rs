//! Route handlers for the webhook server.

pub mod health;
pub mod sms;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sms", post(sms::receive_sms))
        .route("/health", get(health::health))
}
