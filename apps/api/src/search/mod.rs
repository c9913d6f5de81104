//! Two-phase search orchestration: find companies first, then find people
//! employed at the selected companies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod classify;
pub mod client;
pub mod retry;
pub mod session;

pub const COMPANY_PAGE_SIZE: u32 = 10;
pub const CONTACT_PAGE_SIZE: u32 = 20;
/// At most 1000 browsable contacts regardless of the reported total.
pub const CONTACT_PAGE_CAP: u32 = 50;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A non-retryable reply from the search collaborator. Carries the exact
    /// outbound payload so contract mismatches can be diagnosed.
    #[error("search API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        payload: serde_json::Value,
    },

    #[error("search API still failing after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// The collaborator's "Failed to parse search query" reply, which means
    /// pagination ran past the last page rather than a real failure.
    #[error("no more results available")]
    NoMoreResults,

    /// Normalization reduced every filter to nothing. Soft; the caller stays
    /// in its awaiting-search state and nothing is sent.
    #[error("no valid filters to search with")]
    EmptyFilterSet { people_focused: bool },

    #[error("at least one company must be selected")]
    NoCompaniesSelected,

    /// A newer filter state or search replaced this unit of work while it was
    /// in flight. The stale result must be discarded, not surfaced.
    #[error("superseded by a newer request")]
    Superseded,
}

impl SearchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Transport(_) => true,
            SearchError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// A company record as the search collaborator returns it. Only the fields
/// that drive identifier resolution are typed; the rest ride along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Company {
    /// Resolves the identifier the person-search API matches employees on,
    /// in decreasing order of reliability: domain, website hostname,
    /// LinkedIn URL, display name.
    pub fn identifier(&self) -> Option<String> {
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            return Some(strip_www(domain).to_string());
        }
        if let Some(website) = self.website.as_deref().filter(|w| !w.is_empty()) {
            let host = reqwest::Url::parse(website)
                .ok()
                .and_then(|url| url.host_str().map(|h| strip_www(h).to_string()));
            return Some(host.unwrap_or_else(|| website.to_string()));
        }
        if let Some(linkedin) = self.linkedin_url.as_deref().filter(|l| !l.is_empty()) {
            return Some(linkedin.to_string());
        }
        self.display_name().map(str::to_string)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.company_name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// One page of company results.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyPage {
    pub companies: Vec<Company>,
    pub total_count: u64,
    pub page: u32,
    pub total_pages: u32,
}

/// One page of contact results. Profiles are passed through untyped; the
/// consumer renders whatever the collaborator returned.
#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
    pub profiles: Vec<serde_json::Value>,
    pub total_count: u64,
    pub page: u32,
    pub total_pages: u32,
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Pages needed for `total` results at `page_size` per page, never zero.
pub(crate) fn page_count(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(page_size as u64);
    pages.clamp(1, u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(domain: Option<&str>, website: Option<&str>, linkedin: Option<&str>, name: Option<&str>) -> Company {
        Company {
            name: name.map(str::to_string),
            domain: domain.map(str::to_string),
            website: website.map(str::to_string),
            linkedin_url: linkedin.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_identifier_prefers_domain_and_strips_www() {
        let c = company(Some("www.acme.com"), Some("https://other.example"), None, Some("Acme"));
        assert_eq!(c.identifier().as_deref(), Some("acme.com"));
    }

    #[test]
    fn test_identifier_falls_back_to_website_hostname() {
        let c = company(None, Some("https://www.acme.io/about"), None, Some("Acme"));
        assert_eq!(c.identifier().as_deref(), Some("acme.io"));
    }

    #[test]
    fn test_identifier_keeps_unparseable_website_as_is() {
        let c = company(None, Some("not a url"), None, None);
        assert_eq!(c.identifier().as_deref(), Some("not a url"));
    }

    #[test]
    fn test_identifier_linkedin_then_name() {
        let c = company(None, None, Some("https://linkedin.com/company/acme"), Some("Acme"));
        assert_eq!(c.identifier().as_deref(), Some("https://linkedin.com/company/acme"));
        let c = company(None, None, None, Some("Acme"));
        assert_eq!(c.identifier().as_deref(), Some("Acme"));
    }

    #[test]
    fn test_company_deserializes_with_extra_fields() {
        let c: Company = serde_json::from_str(
            r#"{"name":"Acme","domain":"acme.com","employee_count":120}"#,
        )
        .unwrap();
        assert_eq!(c.display_name(), Some("Acme"));
        assert_eq!(c.extra["employee_count"], 120);
    }

    #[test]
    fn test_page_count_rounds_up_and_never_returns_zero() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(47, 10), 5);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(SearchError::Api {
            status: 503,
            message: String::new(),
            payload: serde_json::Value::Null
        }
        .is_retryable());
        assert!(!SearchError::Api {
            status: 400,
            message: String::new(),
            payload: serde_json::Value::Null
        }
        .is_retryable());
        assert!(!SearchError::NoMoreResults.is_retryable());
    }
}
