//! Filter classification: which fields belong to the company-search phase,
//! which to the person-search phase, and what kind of search the current
//! filter state supports.

use tracing::debug;

use crate::filters::normalize::map_keywords;
use crate::filters::vocab::Vocabulary;
use crate::filters::{ApiFilter, ApiFilterValue, FilterBag, FilterType};

/// Fields the company-search endpoint accepts. TAGS rides along because it
/// is folded into KEYWORD before the request goes out.
pub const COMPANY_SCOPED: &[FilterType] = &[
    FilterType::Industry,
    FilterType::Region,
    FilterType::CompanyHeadcount,
    FilterType::CompanyHeadcountGrowth,
    FilterType::AnnualRevenue,
    FilterType::DepartmentHeadcount,
    FilterType::DepartmentHeadcountGrowth,
    FilterType::AccountActivities,
    FilterType::JobOpportunities,
    FilterType::Keyword,
    FilterType::Tags,
];

/// Fields that only make sense against the person-search endpoint.
pub const PERSON_SCOPED: &[FilterType] = &[
    FilterType::CurrentTitle,
    FilterType::SeniorityLevel,
    FilterType::CurrentCompany,
    FilterType::YearsOfExperience,
    FilterType::YearsAtCurrentCompany,
    FilterType::YearsInCurrentPosition,
    FilterType::RecentlyChangedJobs,
    FilterType::PostedOnLinkedin,
    FilterType::InTheNews,
];

pub fn has_company_filters(bag: &FilterBag) -> bool {
    COMPANY_SCOPED
        .iter()
        .any(|&field| bag.get(field).is_some())
}

pub fn has_person_filters(bag: &FilterBag) -> bool {
    PERSON_SCOPED.iter().any(|&field| match field {
        // Toggles count only when explicitly true.
        FilterType::RecentlyChangedJobs
        | FilterType::PostedOnLinkedin
        | FilterType::InTheNews => bag.toggle(field) == Some(true),
        _ => bag.get(field).is_some(),
    })
}

/// How the company-search phase should treat the current filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    /// Person filters present but nothing company-scoped to narrow on. The
    /// company search still runs so the user can pick companies by hand.
    pub people_focused: bool,
    /// Person filters plus a CURRENT_COMPANY but no other company-scoped
    /// filter: look the company up by name as a best-effort keyword.
    pub company_name_keyword: Option<Vec<String>>,
}

pub fn plan(bag: &FilterBag) -> SearchPlan {
    let person = has_person_filters(bag);
    let company = has_company_filters(bag);
    let current_company = bag.list(FilterType::CurrentCompany);

    if person && !company {
        if !current_company.is_empty() {
            debug!("person-focused search, using company name as keyword lookup");
            return SearchPlan {
                people_focused: false,
                company_name_keyword: Some(current_company.to_vec()),
            };
        }
        debug!("pure person-focused search, company phase runs unfiltered");
        return SearchPlan {
            people_focused: true,
            company_name_keyword: None,
        };
    }

    SearchPlan {
        people_focused: false,
        company_name_keyword: None,
    }
}

/// Last-line scrub applied to an externally assembled filter list before it
/// reaches the company-search collaborator: person-scoped entries are
/// removed, industries are snapped to the controlled vocabulary, keywords go
/// through the mapping with only the first surviving, and region values are
/// replaced by the already resolved canonical names when provided.
pub fn sanitize_company_filters(
    filters: Vec<ApiFilter>,
    region_names: &[String],
    vocab: &Vocabulary,
) -> Vec<ApiFilter> {
    filters
        .into_iter()
        .filter(|filter| {
            let company_scoped = COMPANY_SCOPED.contains(&filter.filter_type);
            if !company_scoped {
                debug!(
                    filter_type = filter.filter_type.as_str(),
                    "dropping person-scoped filter from company search"
                );
            }
            company_scoped
        })
        .filter_map(|mut filter| {
            match filter.filter_type {
                FilterType::Industry => {
                    let snapped: Vec<String> = filter
                        .term_values()
                        .iter()
                        .map(|industry| snap_industry(industry, vocab))
                        .collect();
                    filter.value = Some(ApiFilterValue::Terms(snapped));
                }
                FilterType::Keyword | FilterType::Tags => {
                    let mapped = map_keywords(filter.term_values());
                    let first = mapped.into_iter().next();
                    filter.filter_type = FilterType::Keyword;
                    filter.value = Some(ApiFilterValue::Terms(first.into_iter().collect()));
                    if filter.term_values().is_empty() {
                        return None;
                    }
                }
                FilterType::Region if !region_names.is_empty() => {
                    filter.value = Some(ApiFilterValue::Terms(region_names.to_vec()));
                }
                _ => {}
            }
            Some(filter)
        })
        .collect()
}

/// Exact match first, then substring containment, else the value as sent.
fn snap_industry(industry: &str, vocab: &Vocabulary) -> String {
    let lower = industry.to_lowercase();
    if let Some(exact) = vocab
        .industries()
        .iter()
        .find(|i| i.eq_ignore_ascii_case(industry))
    {
        return (*exact).to_string();
    }
    if let Some(partial) = vocab
        .industries()
        .iter()
        .find(|i| i.to_lowercase().contains(&lower))
    {
        return (*partial).to_string();
    }
    industry.to_string()
}
