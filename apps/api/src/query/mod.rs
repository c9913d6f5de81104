//! Query interpretation: turns one free-text sentence into the canonical
//! filter bag via the LLM, the vocabulary matcher, and the normalizer's
//! company-name cleanup.

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{info, warn};

use crate::filters::data::INDUSTRY_MENTION_SYNONYMS;
use crate::filters::normalize::strip_domain_suffix;
use crate::filters::vocab::Vocabulary;
use crate::filters::{FilterBag, FilterSource, FilterType, FilterValue, RangeValue};
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};

pub mod prompts;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model reply was not valid JSON. Carries the raw text for
    /// diagnostics; never retried and never partially parsed.
    #[error("failed to parse LLM reply as JSON")]
    Parse { raw: String },
}

/// The 20-key object the model replies with, before any validation. Every
/// field is optional on the wire; missing and null both read as unset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawParsedFilters {
    #[serde(rename = "CURRENT_TITLE")]
    pub current_title: Vec<String>,
    #[serde(rename = "CURRENT_COMPANY", deserialize_with = "string_or_list")]
    pub current_company: Vec<String>,
    #[serde(rename = "YEARS_OF_EXPERIENCE")]
    pub years_of_experience: Vec<String>,
    #[serde(rename = "INDUSTRY")]
    pub industry: Vec<String>,
    #[serde(rename = "TAGS")]
    pub tags: Vec<String>,
    #[serde(rename = "REGION")]
    pub region: Vec<String>,
    #[serde(rename = "COMPANY_HEADCOUNT")]
    pub company_headcount: Vec<String>,
    #[serde(rename = "COMPANY_HEADCOUNT_GROWTH")]
    pub company_headcount_growth: Option<RangeValue>,
    #[serde(rename = "ANNUAL_REVENUE")]
    pub annual_revenue: Option<RangeValue>,
    #[serde(rename = "DEPARTMENT_HEADCOUNT")]
    pub department_headcount: Option<RangeValue>,
    #[serde(rename = "DEPARTMENT_HEADCOUNT_GROWTH")]
    pub department_headcount_growth: Option<RangeValue>,
    #[serde(rename = "ACCOUNT_ACTIVITIES")]
    pub account_activities: Vec<String>,
    #[serde(rename = "JOB_OPPORTUNITIES")]
    pub job_opportunities: Vec<String>,
    #[serde(rename = "KEYWORD")]
    pub keyword: Vec<String>,
    #[serde(rename = "YEARS_AT_CURRENT_COMPANY")]
    pub years_at_current_company: Vec<String>,
    #[serde(rename = "YEARS_IN_CURRENT_POSITION")]
    pub years_in_current_position: Vec<String>,
    #[serde(rename = "SENIORITY_LEVEL")]
    pub seniority_level: Vec<String>,
    #[serde(rename = "RECENTLY_CHANGED_JOBS")]
    pub recently_changed_jobs: Option<bool>,
    #[serde(rename = "POSTED_ON_LINKEDIN")]
    pub posted_on_linkedin: Option<bool>,
    #[serde(rename = "IN_THE_NEWS")]
    pub in_the_news: Option<bool>,
}

/// CURRENT_COMPANY arrives as either a string or a list of strings.
fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }
    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        Some(StringOrList::One(value)) => vec![value],
        Some(StringOrList::Many(values)) => values,
        None => Vec::new(),
    })
}

/// A parsed query: the canonical bag plus any plausibility warnings.
#[derive(Debug)]
pub struct ParsedQuery {
    pub bag: FilterBag,
    pub warnings: Vec<String>,
}

/// Parses one free-text query into the canonical filter bag.
pub async fn parse_query(
    llm: &LlmClient,
    vocab: &Vocabulary,
    query: &str,
) -> Result<ParsedQuery, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    let user = prompts::QUERY_PARSE_USER_TEMPLATE.replace("{query}", query);
    let reply = llm.complete(prompts::QUERY_PARSE_SYSTEM, &user).await?;

    let text = strip_json_fences(&reply);
    let raw: RawParsedFilters = serde_json::from_str(text).map_err(|err| {
        warn!(%err, "LLM reply was not valid JSON");
        QueryError::Parse {
            raw: reply.clone(),
        }
    })?;

    Ok(reconcile(raw, vocab, query))
}

/// Resolves the raw model output against the controlled vocabularies and
/// runs the post-hoc plausibility checks. Pure, so it is testable without
/// the LLM collaborator.
pub fn reconcile(raw: RawParsedFilters, vocab: &Vocabulary, query: &str) -> ParsedQuery {
    let mut bag = FilterBag::new(FilterSource::QueryParser);

    let mut industries: Vec<String> = Vec::new();
    for industry in &raw.industry {
        match vocab.match_industry(industry) {
            Some(canonical) => {
                if !industries.iter().any(|i| i == canonical) {
                    if !industry.eq_ignore_ascii_case(canonical) {
                        info!("matched industry: {industry:?} -> {canonical:?}");
                    }
                    industries.push(canonical.to_string());
                }
            }
            None => info!("no match found for industry: {industry:?}"),
        }
    }

    let mut regions: Vec<String> = Vec::new();
    let mut region_ids: Vec<String> = Vec::new();
    for region in &raw.region {
        match vocab.match_region(region) {
            Some(entry) => {
                if !regions.iter().any(|r| r == entry.name) {
                    regions.push(entry.name.to_string());
                    region_ids.push(entry.id.to_string());
                }
            }
            None => info!("no match found for region: {region:?}"),
        }
    }

    let companies: Vec<String> = raw
        .current_company
        .iter()
        .map(|c| strip_domain_suffix(c))
        .filter(|c| !c.is_empty())
        .collect();

    let warnings = plausibility_warnings(query, &industries, &regions, &raw.company_headcount);

    bag.set(FilterType::CurrentTitle, FilterValue::list(raw.current_title));
    bag.set(FilterType::CurrentCompany, FilterValue::list(companies));
    bag.set(FilterType::YearsOfExperience, FilterValue::list(raw.years_of_experience));
    bag.set(FilterType::Industry, FilterValue::list(industries));
    bag.set(FilterType::Tags, FilterValue::list(raw.tags));
    bag.set(FilterType::Region, FilterValue::list(regions));
    bag.set(FilterType::RegionIds, FilterValue::list(region_ids));
    bag.set(FilterType::CompanyHeadcount, FilterValue::list(raw.company_headcount));
    bag.set(FilterType::AccountActivities, FilterValue::list(raw.account_activities));
    bag.set(FilterType::JobOpportunities, FilterValue::list(raw.job_opportunities));
    bag.set(FilterType::Keyword, FilterValue::list(raw.keyword));
    bag.set(FilterType::YearsAtCurrentCompany, FilterValue::list(raw.years_at_current_company));
    bag.set(FilterType::YearsInCurrentPosition, FilterValue::list(raw.years_in_current_position));
    bag.set(FilterType::SeniorityLevel, FilterValue::list(raw.seniority_level));

    for (field, range) in [
        (FilterType::CompanyHeadcountGrowth, raw.company_headcount_growth),
        (FilterType::AnnualRevenue, raw.annual_revenue),
        (FilterType::DepartmentHeadcount, raw.department_headcount),
        (FilterType::DepartmentHeadcountGrowth, raw.department_headcount_growth),
    ] {
        if let Some(range) = range {
            bag.set(field, FilterValue::Range(range));
        }
    }

    bag.set(FilterType::RecentlyChangedJobs, FilterValue::Toggle(raw.recently_changed_jobs));
    bag.set(FilterType::PostedOnLinkedin, FilterValue::Toggle(raw.posted_on_linkedin));
    bag.set(FilterType::InTheNews, FilterValue::Toggle(raw.in_the_news));

    for warning in &warnings {
        warn!(query, "{warning}");
    }

    ParsedQuery { bag, warnings }
}

/// Flags matched values that do not appear anywhere in the original query
/// text, a sign of model over-inference. Non-fatal; the values stay.
fn plausibility_warnings(
    query: &str,
    industries: &[String],
    regions: &[String],
    headcounts: &[String],
) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let mut warnings = Vec::new();

    if !industries.is_empty()
        && !industries
            .iter()
            .any(|industry| industry_mentioned(industry, &query_lower))
    {
        warnings.push("Industry was inferred but not explicitly mentioned".to_string());
    }

    if !regions.is_empty()
        && !regions
            .iter()
            .any(|region| query_lower.contains(&letters_only(region)))
    {
        warnings.push("Region was inferred but not explicitly mentioned".to_string());
    }

    if !headcounts.is_empty()
        && !headcounts
            .iter()
            .any(|headcount| query_lower.contains(&headcount.to_lowercase()))
    {
        warnings.push("Company headcount was inferred but not explicitly mentioned".to_string());
    }

    warnings
}

fn industry_mentioned(industry: &str, query_lower: &str) -> bool {
    if query_lower.contains(&letters_only(industry)) {
        return true;
    }
    let industry_lower = industry.to_lowercase();
    INDUSTRY_MENTION_SYNONYMS
        .iter()
        .find(|(name, _)| *name == industry_lower)
        .map(|(_, aliases)| aliases.iter().any(|alias| query_lower.contains(alias)))
        .unwrap_or(false)
}

/// Lowercases and replaces every non-letter with a space, the same loose
/// form used when scanning the query text for a mention.
fn letters_only(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() { c } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_raw(json: &str) -> RawParsedFilters {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_raw_filters_tolerate_missing_and_null_keys() {
        let raw = parse_raw(r#"{"CURRENT_TITLE":["Director"],"RECENTLY_CHANGED_JOBS":null}"#);
        assert_eq!(raw.current_title, vec!["Director"]);
        assert_eq!(raw.recently_changed_jobs, None);
        assert_eq!(raw.posted_on_linkedin, None);
        assert!(raw.industry.is_empty());
    }

    #[test]
    fn test_current_company_accepts_string_or_list() {
        let raw = parse_raw(r#"{"CURRENT_COMPANY":"Google"}"#);
        assert_eq!(raw.current_company, vec!["Google"]);
        let raw = parse_raw(r#"{"CURRENT_COMPANY":["Google","Meta"]}"#);
        assert_eq!(raw.current_company, vec!["Google", "Meta"]);
    }

    #[test]
    fn test_reconcile_matches_vocab_and_keeps_ids_in_lockstep() {
        let raw = parse_raw(
            r#"{"INDUSTRY":["fintech"],"REGION":["nyc","bangalore"]}"#,
        );
        let parsed = reconcile(raw, &Vocabulary::builtin(), "fintech leads in nyc and bangalore");
        assert_eq!(parsed.bag.list(FilterType::Industry), &["Financial Services"]);
        assert_eq!(
            parsed.bag.list(FilterType::Region),
            &["New York City Metropolitan Area", "Bengaluru Area, India"]
        );
        assert_eq!(parsed.bag.list(FilterType::RegionIds).len(), 2);
        assert_eq!(parsed.bag.source(), Some(FilterSource::QueryParser));
    }

    #[test]
    fn test_reconcile_cleans_company_domains() {
        let raw = parse_raw(r#"{"CURRENT_COMPANY":["coursera.org","Google"]}"#);
        let parsed = reconcile(raw, &Vocabulary::builtin(), "people at coursera.org and Google");
        assert_eq!(parsed.bag.list(FilterType::CurrentCompany), &["coursera", "Google"]);
    }

    #[test]
    fn test_reconcile_preserves_toggle_tri_state() {
        let raw = parse_raw(r#"{"RECENTLY_CHANGED_JOBS":false,"IN_THE_NEWS":true}"#);
        let parsed = reconcile(raw, &Vocabulary::builtin(), "anyone in the news");
        assert_eq!(parsed.bag.toggle(FilterType::RecentlyChangedJobs), Some(false));
        assert_eq!(parsed.bag.toggle(FilterType::InTheNews), Some(true));
        // Missing on the wire stays unset, never becomes false.
        assert_eq!(parsed.bag.get(FilterType::PostedOnLinkedin), None);
    }

    #[test]
    fn test_plausibility_flags_inferred_industry() {
        let raw = parse_raw(r#"{"INDUSTRY":["Financial Services"]}"#);
        let parsed = reconcile(raw, &Vocabulary::builtin(), "find leads at Stripe");
        assert_eq!(
            parsed.warnings,
            vec!["Industry was inferred but not explicitly mentioned"]
        );
    }

    #[test]
    fn test_plausibility_accepts_synonym_mention() {
        let raw = parse_raw(r#"{"INDUSTRY":["Financial Services"]}"#);
        let parsed = reconcile(raw, &Vocabulary::builtin(), "fintech companies in Boston");
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_plausibility_flags_inferred_region_and_headcount() {
        let raw = parse_raw(
            r#"{"REGION":["San Francisco Bay Area"],"COMPANY_HEADCOUNT":["11-50"]}"#,
        );
        let parsed = reconcile(raw, &Vocabulary::builtin(), "startup founders");
        assert_eq!(parsed.warnings.len(), 2);
    }

    #[test]
    fn test_unmatched_vocab_values_are_dropped_not_substituted() {
        let raw = parse_raw(r#"{"INDUSTRY":["underwater basket weaving"],"REGION":["Atlantis"]}"#);
        let parsed = reconcile(
            raw,
            &Vocabulary::builtin(),
            "underwater basket weaving in Atlantis",
        );
        assert_eq!(parsed.bag.get(FilterType::Industry), None);
        assert_eq!(parsed.bag.get(FilterType::Region), None);
        assert_eq!(parsed.bag.get(FilterType::RegionIds), None);
    }

    #[test]
    fn test_senior_directors_at_google_scenario() {
        let raw = parse_raw(
            r#"{"CURRENT_TITLE":["Director"],"SENIORITY_LEVEL":["Senior"],
                "CURRENT_COMPANY":["Google"],"RECENTLY_CHANGED_JOBS":true}"#,
        );
        let parsed = reconcile(
            raw,
            &Vocabulary::builtin(),
            "Find senior directors at Google who recently changed jobs",
        );
        assert_eq!(parsed.bag.list(FilterType::CurrentTitle), &["Director"]);
        assert_eq!(parsed.bag.list(FilterType::SeniorityLevel), &["Senior"]);
        assert_eq!(parsed.bag.list(FilterType::CurrentCompany), &["Google"]);
        assert_eq!(parsed.bag.toggle(FilterType::RecentlyChangedJobs), Some(true));

        // Everything unmentioned serializes as the schema default.
        let json = serde_json::to_value(&parsed.bag).unwrap();
        assert_eq!(json["INDUSTRY"], serde_json::json!([]));
        assert_eq!(json["REGION"], serde_json::json!([]));
        assert_eq!(json["IN_THE_NEWS"], serde_json::Value::Null);
    }

    #[test]
    fn test_bag_serializes_full_schema() {
        let raw = parse_raw(r#"{"CURRENT_TITLE":["CFO"],"IN_THE_NEWS":true}"#);
        let parsed = reconcile(raw, &Vocabulary::builtin(), "CFOs in the news");
        let json = serde_json::to_value(&parsed.bag).unwrap();
        assert_eq!(json["CURRENT_TITLE"], serde_json::json!(["CFO"]));
        assert_eq!(json["IN_THE_NEWS"], serde_json::json!(true));
        assert_eq!(json["RECENTLY_CHANGED_JOBS"], serde_json::Value::Null);
        assert_eq!(json["_source"], serde_json::json!("query_parser"));
    }
}
