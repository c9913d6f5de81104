//! HTTP client for the Crustdata screener endpoints, behind the
//! `SearchBackend` trait so the orchestrator can run against a mock.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::retry::RetryPolicy;
use super::{Company, SearchError};
use crate::filters::ApiFilter;

const COMPANY_SEARCH_URL: &str = "https://api.crustdata.com/screener/company/search";
const PERSON_SEARCH_URL: &str = "https://api.crustdata.com/screener/person/search";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct CompanySearchRequest {
    pub filters: Vec<ApiFilter>,
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "regionIds", skip_serializing_if = "Vec::is_empty")]
    pub region_ids: Vec<String>,
    #[serde(rename = "regionNames", skip_serializing_if = "Vec::is_empty")]
    pub region_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonSearchRequest {
    pub filters: Vec<ApiFilter>,
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_processing: Option<PostProcessing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostProcessing {
    pub strict_title_and_company_match: bool,
}

/// The company endpoint answers with either `companies` or `results`, and
/// either `total_count` or `total_display_count`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanySearchResponse {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub results: Vec<Company>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_display_count: Option<u64>,
}

impl CompanySearchResponse {
    pub fn into_companies(self) -> Vec<Company> {
        if !self.companies.is_empty() {
            self.companies
        } else {
            self.results
        }
    }

    /// Best-effort total: the reported count, else however many came back.
    pub fn total(&self) -> u64 {
        self.total_count
            .or(self.total_display_count)
            .unwrap_or_else(|| {
                if self.companies.is_empty() {
                    self.results.len() as u64
                } else {
                    self.companies.len() as u64
                }
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonSearchResponse {
    #[serde(default)]
    pub profiles: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_display_count: Option<u64>,
}

/// The API reports counts as numbers or numeric strings depending on the
/// endpoint.
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Text(String),
    }
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// The abstract search collaborator. The orchestrator only sees this trait.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn company_search(
        &self,
        request: &CompanySearchRequest,
    ) -> Result<CompanySearchResponse, SearchError>;

    async fn person_search(
        &self,
        request: &PersonSearchRequest,
    ) -> Result<PersonSearchResponse, SearchError>;
}

/// Live Crustdata client with a bounded retry budget per call.
pub struct CrustdataClient {
    client: reqwest::Client,
    api_key: String,
    retry: RetryPolicy,
}

impl CrustdataClient {
    pub fn new(api_key: String) -> Self {
        Self::with_retry(api_key, RetryPolicy::default())
    }

    pub fn with_retry(api_key: String, retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            retry,
        }
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, SearchError> {
        self.retry
            .run(|| async {
                debug!(url, "calling search API");
                let response = self
                    .client
                    .post(url)
                    .bearer_auth(&self.api_key)
                    .json(body)
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    let message = match serde_json::from_str::<ApiErrorBody>(&text) {
                        // Paginating past the last page, not a real failure.
                        Ok(err) if err.error == "Failed to parse search query" => {
                            return Err(SearchError::NoMoreResults);
                        }
                        Ok(err) => err.error,
                        Err(_) => text,
                    };
                    return Err(SearchError::Api {
                        status: status.as_u16(),
                        message,
                        payload: serde_json::to_value(body).unwrap_or_default(),
                    });
                }

                Ok(response.json().await?)
            })
            .await
    }
}

#[async_trait]
impl SearchBackend for CrustdataClient {
    async fn company_search(
        &self,
        request: &CompanySearchRequest,
    ) -> Result<CompanySearchResponse, SearchError> {
        self.post_json(COMPANY_SEARCH_URL, request).await
    }

    async fn person_search(
        &self,
        request: &PersonSearchRequest,
    ) -> Result<PersonSearchResponse, SearchError> {
        self.post_json(PERSON_SEARCH_URL, request).await
    }
}
