//! Filter normalization: turns the canonical filter bag into the validated,
//! API-ready filter list, recording a warning for every value it rejects.

use tracing::warn;

use super::data::{
    ACCOUNT_ACTIVITY_VALUES, COMPANY_HEADCOUNT_VALUES, DOMAIN_SUFFIXES, JOB_OPPORTUNITY_VALUES,
    KEYWORD_MAPPING, SENIORITY_LEVEL_VALUES, YEARS_RANGE_VALUES,
};
use super::vocab::Vocabulary;
use super::{ApiFilter, FilterBag, FilterType, RangeValue, ValidationWarning};

/// Per-field default bounds for range filters. A range is accepted when at
/// least one bound is present; the missing bound is filled in from here.
const RANGE_MIN_DEFAULT: f64 = 0.0;

fn range_defaults(filter_type: FilterType) -> (f64, Option<&'static str>) {
    match filter_type {
        FilterType::CompanyHeadcountGrowth => (100.0, None),
        FilterType::AnnualRevenue => (1000.0, Some("USD")),
        FilterType::DepartmentHeadcount => (100.0, Some("Engineering")),
        FilterType::DepartmentHeadcountGrowth => (50.0, Some("Engineering")),
        _ => (f64::MAX, None),
    }
}

/// The fixed allow-list for an enumeration-constrained list field, if any.
pub fn allow_list(filter_type: FilterType) -> Option<&'static [&'static str]> {
    match filter_type {
        FilterType::CompanyHeadcount => Some(COMPANY_HEADCOUNT_VALUES),
        FilterType::YearsOfExperience
        | FilterType::YearsAtCurrentCompany
        | FilterType::YearsInCurrentPosition => Some(YEARS_RANGE_VALUES),
        FilterType::AccountActivities => Some(ACCOUNT_ACTIVITY_VALUES),
        FilterType::JobOpportunities => Some(JOB_OPPORTUNITY_VALUES),
        FilterType::SeniorityLevel => Some(SENIORITY_LEVEL_VALUES),
        _ => None,
    }
}

/// A normalized filter set ready for a company-search request, plus the
/// region name/id pair lists that ride alongside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFilters {
    pub filters: Vec<ApiFilter>,
    pub region_names: Vec<String>,
    pub region_ids: Vec<String>,
    pub warnings: Vec<ValidationWarning>,
}

impl NormalizedFilters {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn warn(&mut self, field: FilterType, rejected: Vec<String>, message: &str) {
        if rejected.is_empty() {
            return;
        }
        warn!(field = field.as_str(), ?rejected, "{message}");
        self.warnings.push(ValidationWarning {
            field,
            rejected,
            message: message.to_string(),
        });
    }

    /// Filters a list down to the allow-list, keeping the canonical casing.
    /// An empty survivor set drops the field (never sent as an empty array).
    fn push_enumerated(&mut self, field: FilterType, values: &[String]) {
        let Some(valid) = allow_list(field) else {
            if !values.is_empty() {
                self.filters.push(ApiFilter::terms(field, values.to_vec()));
            }
            return;
        };
        let mut kept = Vec::new();
        let mut rejected = Vec::new();
        for value in values {
            match valid.iter().find(|v| v.eq_ignore_ascii_case(value)) {
                Some(canonical) => kept.push((*canonical).to_string()),
                None => rejected.push(value.clone()),
            }
        }
        self.warn(field, rejected, "value not in allow-list, dropped");
        if !kept.is_empty() {
            self.filters.push(ApiFilter::terms(field, kept));
        }
    }

    fn push_range(&mut self, field: FilterType, range: &RangeValue) {
        if range.is_unset() {
            return;
        }
        let (max_default, sub_default) = range_defaults(field);
        let min = range.min.unwrap_or(RANGE_MIN_DEFAULT);
        let max = range.max.unwrap_or(max_default);
        let sub_filter = match field {
            // Revenue is always quoted in USD regardless of what came in.
            FilterType::AnnualRevenue => sub_default.map(str::to_string),
            _ => range
                .sub_filter
                .clone()
                .or_else(|| sub_default.map(str::to_string)),
        };
        self.filters.push(ApiFilter::between(field, min, max, sub_filter));
    }
}

/// Builds the company-search filter list from the canonical bag.
///
/// INDUSTRY and REGION values resolve through the vocabulary (exact, then
/// synonym, then fuzzy); unmatched elements are dropped one by one. Region
/// ids are captured in lockstep with the matched region names. TAGS wins
/// over KEYWORD and only one keyword ever goes out.
pub fn normalize_company_filters(bag: &FilterBag, vocab: &Vocabulary) -> NormalizedFilters {
    let mut out = NormalizedFilters::default();

    let industries = bag.list(FilterType::Industry);
    if !industries.is_empty() {
        let mut matched = Vec::new();
        let mut rejected = Vec::new();
        for industry in industries {
            match vocab.match_industry(industry) {
                Some(canonical) => {
                    if !matched.iter().any(|m| m == canonical) {
                        matched.push(canonical.to_string());
                    }
                }
                None => rejected.push(industry.clone()),
            }
        }
        out.warn(FilterType::Industry, rejected, "no industry match, dropped");
        if !matched.is_empty() {
            out.filters.push(ApiFilter::terms(FilterType::Industry, matched));
        }
    }

    let regions = bag.list(FilterType::Region);
    if !regions.is_empty() {
        let mut rejected = Vec::new();
        for region in regions {
            match vocab.match_region(region) {
                Some(entry) => {
                    if !out.region_names.iter().any(|n| n == entry.name) {
                        out.region_names.push(entry.name.to_string());
                        out.region_ids.push(entry.id.to_string());
                    }
                }
                None => rejected.push(region.clone()),
            }
        }
        out.warn(FilterType::Region, rejected, "no region match, dropped");
        if !out.region_names.is_empty() {
            out.filters
                .push(ApiFilter::terms(FilterType::Region, out.region_names.clone()));
        }
    }

    out.push_enumerated(FilterType::CompanyHeadcount, bag.list(FilterType::CompanyHeadcount));
    out.push_enumerated(FilterType::AccountActivities, bag.list(FilterType::AccountActivities));
    out.push_enumerated(FilterType::JobOpportunities, bag.list(FilterType::JobOpportunities));

    for field in [
        FilterType::CompanyHeadcountGrowth,
        FilterType::AnnualRevenue,
        FilterType::DepartmentHeadcount,
        FilterType::DepartmentHeadcountGrowth,
    ] {
        if let Some(range) = bag.range(field) {
            out.push_range(field, range);
        }
    }

    if let Some(keyword) = company_keyword(bag) {
        out.filters
            .push(ApiFilter::terms(FilterType::Keyword, vec![keyword]));
    }

    out
}

/// The single keyword a company search may carry. TAGS takes precedence over
/// KEYWORD; either way only the first element survives, mapped through the
/// keyword table.
pub fn company_keyword(bag: &FilterBag) -> Option<String> {
    let tags = bag.list(FilterType::Tags);
    let source = if !tags.is_empty() {
        tags
    } else {
        bag.list(FilterType::Keyword)
    };
    map_keywords(source).into_iter().next()
}

/// Rewrites keywords through the static mapping, case-insensitively. Unmapped
/// keywords pass through unchanged. The mapping has no chained entries, so
/// applying it twice is a no-op.
pub fn map_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|keyword| {
            let key = keyword.trim().to_lowercase();
            KEYWORD_MAPPING
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| (*to).to_string())
                .unwrap_or_else(|| keyword.trim().to_string())
        })
        .collect()
}

/// Builds the person-scoped filter list for a contact search from the bag:
/// the years/seniority enumerations plus the boolean flags. Company
/// identifiers and job titles are attached by the caller, which owns them.
pub fn normalize_person_filters(bag: &FilterBag) -> NormalizedFilters {
    let mut out = NormalizedFilters::default();

    for field in [
        FilterType::YearsOfExperience,
        FilterType::YearsAtCurrentCompany,
        FilterType::YearsInCurrentPosition,
        FilterType::SeniorityLevel,
    ] {
        out.push_enumerated(field, bag.list(field));
    }

    // Boolean filters go out only when explicitly true. Unset stays unset.
    for field in [
        FilterType::RecentlyChangedJobs,
        FilterType::PostedOnLinkedin,
        FilterType::InTheNews,
    ] {
        if bag.toggle(field) == Some(true) {
            out.filters.push(ApiFilter::flag(field));
        }
    }

    out
}

/// Strips recognized TLD suffixes from a company name extracted from a
/// domain, repeating until none remains so "example.co.uk" reduces all the
/// way to "example".
pub fn strip_domain_suffix(name: &str) -> String {
    let mut current = name.trim().to_string();
    loop {
        let lowered = current.to_lowercase();
        let stripped = DOMAIN_SUFFIXES.iter().find_map(|suffix| {
            let tail = format!(".{suffix}");
            lowered.ends_with(&tail).then(|| current[..current.len() - tail.len()].to_string())
        });
        match stripped {
            Some(next) if !next.is_empty() => current = next,
            _ => return current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterSource, FilterValue};

    fn bag() -> FilterBag {
        FilterBag::new(FilterSource::QueryParser)
    }

    fn list(values: &[&str]) -> FilterValue {
        FilterValue::list(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_enumerated_field_drops_invalid_values_with_warning() {
        let mut b = bag();
        b.set(FilterType::CompanyHeadcount, list(&["11-50", "tiny", "10,001+"]));
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert_eq!(out.filters.len(), 1);
        assert_eq!(out.filters[0].term_values(), &["11-50", "10,001+"]);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].field, FilterType::CompanyHeadcount);
        assert_eq!(out.warnings[0].rejected, vec!["tiny"]);
    }

    #[test]
    fn test_all_invalid_values_drop_field_entirely() {
        let mut b = bag();
        b.set(FilterType::CompanyHeadcount, list(&["huge", "massive"]));
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert!(out.filters.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_allow_list_match_is_case_insensitive_and_canonicalizes() {
        let mut b = bag();
        b.set(FilterType::JobOpportunities, list(&["hiring on linkedin"]));
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert_eq!(out.filters[0].term_values(), &["Hiring on Linkedin"]);
    }

    #[test]
    fn test_range_defaults_per_field() {
        let mut b = bag();
        b.set(
            FilterType::CompanyHeadcountGrowth,
            FilterValue::Range(RangeValue { min: Some(20.0), max: None, sub_filter: None }),
        );
        b.set(
            FilterType::AnnualRevenue,
            FilterValue::Range(RangeValue { min: Some(10.0), max: None, sub_filter: None }),
        );
        b.set(
            FilterType::DepartmentHeadcountGrowth,
            FilterValue::Range(RangeValue { min: Some(15.0), max: None, sub_filter: None }),
        );
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        let find = |ft: FilterType| out.filters.iter().find(|f| f.filter_type == ft).unwrap();

        let growth = serde_json::to_value(find(FilterType::CompanyHeadcountGrowth)).unwrap();
        assert_eq!(growth["value"]["max"], 100.0);
        assert!(growth.get("sub_filter").is_none());

        let revenue = serde_json::to_value(find(FilterType::AnnualRevenue)).unwrap();
        assert_eq!(revenue["value"]["max"], 1000.0);
        assert_eq!(revenue["sub_filter"], "USD");

        let dept = serde_json::to_value(find(FilterType::DepartmentHeadcountGrowth)).unwrap();
        assert_eq!(dept["value"]["max"], 50.0);
        assert_eq!(dept["sub_filter"], "Engineering");
    }

    #[test]
    fn test_department_headcount_keeps_explicit_sub_filter() {
        let mut b = bag();
        b.set(
            FilterType::DepartmentHeadcount,
            FilterValue::Range(RangeValue {
                min: Some(10.0),
                max: Some(50.0),
                sub_filter: Some("Sales".into()),
            }),
        );
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert_eq!(out.filters[0].sub_filter.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_annual_revenue_forces_usd_over_explicit_currency() {
        let mut b = bag();
        b.set(
            FilterType::AnnualRevenue,
            FilterValue::Range(RangeValue {
                min: Some(5.0),
                max: Some(50.0),
                sub_filter: Some("EUR".into()),
            }),
        );
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert_eq!(out.filters[0].sub_filter.as_deref(), Some("USD"));
    }

    #[test]
    fn test_tags_win_over_keyword_and_only_first_survives() {
        let mut b = bag();
        b.set(FilterType::Tags, list(&["fintech", "b2b"]));
        b.set(FilterType::Keyword, list(&["blockchain"]));
        assert_eq!(company_keyword(&b).as_deref(), Some("financial technology"));
    }

    #[test]
    fn test_keyword_used_when_tags_empty() {
        let mut b = bag();
        b.set(FilterType::Keyword, list(&["seed-funded", "blockchain"]));
        assert_eq!(company_keyword(&b).as_deref(), Some("seed funding"));
    }

    #[test]
    fn test_keyword_mapping_is_idempotent() {
        let once = map_keywords(&["fintech".to_string(), "novel term".to_string()]);
        let twice = map_keywords(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_region_names_and_ids_stay_in_lockstep() {
        let mut b = bag();
        b.set(FilterType::Region, list(&["nyc", "Atlantis", "bangalore"]));
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert_eq!(
            out.region_names,
            vec!["New York City Metropolitan Area", "Bengaluru Area, India"]
        );
        assert_eq!(out.region_names.len(), out.region_ids.len());
        assert_eq!(out.region_ids[0], "90000070");
        assert_eq!(out.warnings[0].rejected, vec!["Atlantis"]);
    }

    #[test]
    fn test_industry_elements_dropped_individually() {
        let mut b = bag();
        b.set(FilterType::Industry, list(&["fintech", "underwater basket weaving"]));
        let out = normalize_company_filters(&b, &Vocabulary::builtin());
        assert_eq!(out.filters[0].term_values(), &["Financial Services"]);
        assert_eq!(out.warnings[0].rejected, vec!["underwater basket weaving"]);
    }

    #[test]
    fn test_person_filters_cover_enums_and_true_flags_only() {
        let mut b = bag();
        b.set(FilterType::SeniorityLevel, list(&["Senior", "Intergalactic"]));
        b.set(FilterType::YearsOfExperience, list(&["3 to 5 years"]));
        b.set(FilterType::RecentlyChangedJobs, FilterValue::Toggle(Some(true)));
        b.set(FilterType::PostedOnLinkedin, FilterValue::Toggle(Some(false)));
        let out = normalize_person_filters(&b);

        let types: Vec<_> = out.filters.iter().map(|f| f.filter_type).collect();
        assert!(types.contains(&FilterType::SeniorityLevel));
        assert!(types.contains(&FilterType::YearsOfExperience));
        assert!(types.contains(&FilterType::RecentlyChangedJobs));
        assert!(!types.contains(&FilterType::PostedOnLinkedin));

        let flag = out
            .filters
            .iter()
            .find(|f| f.filter_type == FilterType::RecentlyChangedJobs)
            .unwrap();
        let json = serde_json::to_value(flag).unwrap();
        assert_eq!(json, serde_json::json!({"filter_type": "RECENTLY_CHANGED_JOBS"}));
    }

    #[test]
    fn test_strip_domain_suffix_repeats_until_fixpoint() {
        assert_eq!(strip_domain_suffix("coursera.org"), "coursera");
        assert_eq!(strip_domain_suffix("example.co.uk"), "example");
        assert_eq!(strip_domain_suffix("Google"), "Google");
        // Never strips down to nothing.
        assert_eq!(strip_domain_suffix(".com"), ".com");
    }

    #[test]
    fn test_normalization_is_idempotent_on_surviving_values() {
        let mut b = bag();
        b.set(FilterType::Industry, list(&["fintech"]));
        b.set(FilterType::CompanyHeadcount, list(&["11-50"]));
        let first = normalize_company_filters(&b, &Vocabulary::builtin());

        // Feed the survivors back through a fresh bag.
        let mut again = bag();
        for filter in &first.filters {
            again.set(filter.filter_type, FilterValue::list(filter.term_values().to_vec()));
        }
        let second = normalize_company_filters(&again, &Vocabulary::builtin());
        assert_eq!(first.filters, second.filters);
        assert!(second.warnings.is_empty());
    }
}
