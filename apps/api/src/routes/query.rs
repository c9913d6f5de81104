use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::filters::sidebar::SidebarForm;
use crate::filters::FilterBag;
use crate::query::parse_query;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ParseQueryRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct ParseQueryResponse {
    pub filters: FilterBag,
    /// The same filters projected onto the sidebar's own field names, so the
    /// UI can seed its facets from a parsed query.
    pub sidebar: SidebarForm,
    /// Plausibility and validation notes. Informational; the filters above
    /// are already usable as-is.
    pub warnings: Vec<String>,
}

/// POST /api/parse-query
pub async fn handle_parse_query(
    State(state): State<AppState>,
    Json(req): Json<ParseQueryRequest>,
) -> Result<Json<ParseQueryResponse>, AppError> {
    let parsed = parse_query(&state.llm, &state.vocab, &req.query).await?;
    info!(
        fields = parsed.bag.len(),
        warnings = parsed.warnings.len(),
        "parsed free-text query"
    );
    Ok(Json(ParseQueryResponse {
        sidebar: SidebarForm::from_bag(&parsed.bag),
        filters: parsed.bag,
        warnings: parsed.warnings,
    }))
}
