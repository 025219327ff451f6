pub mod bids;
pub mod placeholders;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;
use placeholders::not_implemented;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Users
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .route(
            "/api/users/profile/{id}",
            get(users::get_profile).put(users::update_profile),
        )
        // Bids
        .route("/api/bids", post(bids::create))
        .route("/api/bids/request/{request_id}", get(not_implemented))
        .route("/api/bids/provider/{provider_id}", get(not_implemented))
        .route("/api/bids/{id}/accept", post(not_implemented))
        .route("/api/bids/{id}/reject", post(not_implemented))
        // Service requests
        .route("/api/requests", get(not_implemented).post(not_implemented))
        .route(
            "/api/requests/{id}",
            get(not_implemented)
                .put(not_implemented)
                .delete(not_implemented),
        )
        // Agreements
        .route("/api/agreements/user/{user_id}", get(not_implemented))
        .route("/api/agreements/{id}/complete", post(not_implemented))
        // Ratings
        .route("/api/ratings", post(not_implemented))
        .route("/api/ratings/user/{user_id}", get(not_implemented))
}
