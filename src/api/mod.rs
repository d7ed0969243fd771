// API layer module (HTTP adapters)

pub mod errors;
pub mod extract;
pub mod handlers;

use axum::{routing::get, Router};
use sqlx::PgPool;

use handlers::members;

/// Builds the application router
///
/// Shared between the binary and the integration tests so both serve
/// exactly the same routes.
pub fn app(pool: PgPool) -> Router {
    Router::new()
        // Health check
        .route("/health", get(members::health_check))
        // Member routes
        .route("/members", get(members::list_members))
        .route("/members/dto", get(members::list_member_dtos))
        .route("/members/:id", get(members::get_member_username))
        .route("/members2/:id", get(members::get_member_username_resolved))
        // Shared state
        .with_state(pool)
}
