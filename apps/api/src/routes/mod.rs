pub mod filter_data;
pub mod health;
pub mod query;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/parse-query", post(query::handle_parse_query))
        .route("/api/find-companies", post(search::handle_find_companies))
        .route("/api/find-contacts", post(search::handle_find_contacts))
        .route("/api/filter-data", get(filter_data::handle_filter_data))
        .with_state(state)
}
