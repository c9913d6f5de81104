use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::filters::data::{
    ACCOUNT_ACTIVITY_VALUES, COMPANY_HEADCOUNT_VALUES, DEPARTMENTS, JOB_OPPORTUNITY_VALUES,
    SENIORITY_LEVEL_VALUES, YEARS_RANGE_VALUES,
};
use crate::state::AppState;

/// Common job titles offered as sidebar suggestions. Free-text titles are
/// accepted too; this list only seeds the dropdown.
const JOB_TITLE_SUGGESTIONS: &[&str] = &[
    "CEO",
    "CTO",
    "CFO",
    "COO",
    "VP Engineering",
    "VP Sales",
    "VP Marketing",
    "Director of Product",
    "Senior Manager",
    "Manager",
    "Lead Developer",
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "Sales Manager",
    "Chief Marketing Officer",
    "Chief Information Officer",
];

const GROWTH_RANGES: &[&str] = &["0-10%", "10-25%", "25-50%", "50-100%", "100%+"];

const REVENUE_RANGES: &[&str] = &[
    "Under $1M",
    "$1M-$10M",
    "$10M-$50M",
    "$50M-$100M",
    "$100M-$500M",
    "$500M-$1B",
    "$1B-$5B",
    "$5B+",
];

/// GET /api/filter-data
/// Static option lists for the sidebar. Everything that feeds a validated
/// filter comes from the same allow-lists the normalizer enforces.
pub async fn handle_filter_data(State(state): State<AppState>) -> Json<Value> {
    let mut industries: Vec<&str> = state.vocab.industries().to_vec();
    industries.sort_unstable();
    let regions: Vec<&str> = state.vocab.region_names().collect();

    Json(json!({
        "jobTitles": JOB_TITLE_SUGGESTIONS,
        "industries": industries,
        "regions": regions,
        "companySizes": COMPANY_HEADCOUNT_VALUES,
        "revenueRanges": REVENUE_RANGES,
        "seniorityLevels": SENIORITY_LEVEL_VALUES,
        "yearsRanges": YEARS_RANGE_VALUES,
        "growthRanges": GROWTH_RANGES,
        "departments": DEPARTMENTS,
        "accountActivities": ACCOUNT_ACTIVITY_VALUES,
        "jobOpportunities": JOB_OPPORTUNITY_VALUES,
        "booleanOptions": [
            {"label": "Yes", "value": true},
            {"label": "No", "value": false}
        ]
    }))
}
