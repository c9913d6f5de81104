use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::query::QueryError;
use crate::search::SearchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Query(err) => match err {
                QueryError::EmptyQuery => (
                    StatusCode::BAD_REQUEST,
                    "EMPTY_QUERY",
                    "Search query must not be empty".to_string(),
                ),
                QueryError::Parse { raw } => {
                    tracing::warn!(raw = %raw, "query parse produced unusable output");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "QUERY_PARSE_ERROR",
                        "Could not convert the query into filters".to_string(),
                    )
                }
                QueryError::Llm(e) => {
                    tracing::error!("LLM error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "LLM_ERROR",
                        "An AI processing error occurred".to_string(),
                    )
                }
            },
            AppError::Search(err) => match err {
                SearchError::EmptyFilterSet { people_focused } => {
                    let message = if *people_focused {
                        "Only person-level filters were given; add at least one company filter"
                    } else {
                        "No filters to search with"
                    };
                    (StatusCode::BAD_REQUEST, "EMPTY_FILTER_SET", message.to_string())
                }
                SearchError::NoCompaniesSelected => (
                    StatusCode::BAD_REQUEST,
                    "NO_COMPANIES_SELECTED",
                    "Select at least one company before searching for contacts".to_string(),
                ),
                SearchError::Superseded => (
                    StatusCode::CONFLICT,
                    "SUPERSEDED",
                    "The filters changed while this search was running".to_string(),
                ),
                SearchError::NoMoreResults => (
                    StatusCode::NOT_FOUND,
                    "NO_MORE_RESULTS",
                    "No more results for these filters".to_string(),
                ),
                SearchError::Transport(e) => {
                    tracing::error!("Search transport error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "The search provider could not be reached".to_string(),
                    )
                }
                SearchError::Api {
                    status,
                    message,
                    payload,
                } => {
                    tracing::error!(status, %payload, "search provider rejected request: {message}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "The search provider returned an error".to_string(),
                    )
                }
                SearchError::RetriesExhausted { attempts } => {
                    tracing::error!(attempts, "search retries exhausted");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "The search provider kept failing".to_string(),
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
