use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::filters::sidebar::SidebarForm;
use crate::filters::{FilterBag, FilterType, FilterValue};
use crate::search::session::SearchSession;
use crate::search::{Company, CompanyPage, CONTACT_PAGE_SIZE};
use crate::state::AppState;

fn first_page() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct FindCompaniesRequest {
    /// The canonical filter bag, as parse-query returns it.
    #[serde(default)]
    pub filters: Option<FilterBag>,
    /// Alternatively, the sidebar form as the UI submits it.
    #[serde(default)]
    pub sidebar: Option<SidebarForm>,
    #[serde(default = "first_page")]
    pub page: u32,
}

/// POST /api/find-companies
///
/// Stateless: each request carries the full filter state (canonical bag or
/// sidebar form) and runs through a fresh session.
pub async fn handle_find_companies(
    State(state): State<AppState>,
    Json(req): Json<FindCompaniesRequest>,
) -> Result<Json<CompanyPage>, AppError> {
    let bag = match (req.filters, req.sidebar) {
        (Some(bag), _) => bag,
        (None, Some(form)) => form.apply(),
        (None, None) => {
            return Err(AppError::Validation(
                "either filters or sidebar is required".to_string(),
            ))
        }
    };

    let mut session = SearchSession::new(state.search.clone(), state.vocab.clone());
    session.apply_filters(bag);
    let page = session.search_companies(req.page).await?;
    Ok(Json(page))
}

#[derive(Deserialize)]
pub struct FindContactsRequest {
    pub companies: Vec<Company>,
    /// Canonical filter bag carrying person-scoped fields. Optional; bare
    /// job_titles below cover the common case.
    #[serde(default)]
    pub filters: Option<FilterBag>,
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default = "first_page")]
    pub page: u32,
}

#[derive(Serialize)]
pub struct FindContactsResponse {
    pub profiles: Vec<Value>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub items_per_page: u32,
}

/// POST /api/find-contacts
pub async fn handle_find_contacts(
    State(state): State<AppState>,
    Json(req): Json<FindContactsRequest>,
) -> Result<Json<FindContactsResponse>, AppError> {
    if req.companies.is_empty() {
        return Err(AppError::Validation(
            "companies must not be empty".to_string(),
        ));
    }

    let mut bag = req.filters.unwrap_or_default();
    if !req.job_titles.is_empty() {
        bag.set(FilterType::CurrentTitle, FilterValue::list(req.job_titles));
    }

    let mut session = SearchSession::new(state.search.clone(), state.vocab.clone());
    session.apply_filters(bag);
    session.select_companies(req.companies);
    let page = session.search_contacts(req.page).await?;

    Ok(Json(FindContactsResponse {
        profiles: page.profiles,
        total_count: page.total_count,
        current_page: page.page,
        total_pages: page.total_pages,
        items_per_page: CONTACT_PAGE_SIZE,
    }))
}
