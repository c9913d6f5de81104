//! Per-session search state machine. Owns the canonical filter bag, decides
//! which phase runs, and stitches the company and contact searches together
//! with pagination clamping and last-write-wins invalidation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::classify;
use super::client::{
    CompanySearchRequest, PersonSearchRequest, PostProcessing, SearchBackend,
};
use super::{
    page_count, Company, CompanyPage, ContactPage, SearchError, COMPANY_PAGE_SIZE,
    CONTACT_PAGE_CAP, CONTACT_PAGE_SIZE,
};
use crate::filters::normalize::{normalize_company_filters, normalize_person_filters};
use crate::filters::vocab::Vocabulary;
use crate::filters::{ApiFilter, FilterBag, FilterSource, FilterType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingSearch,
    CompanySearch,
    ContactSearch,
}

/// Whether a filter change should kick off a search on its own. Sidebar
/// applies auto-run; parsed queries wait for an explicit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Auto,
    Manual,
}

/// A clonable token for cancelling in-flight work belonging to this session.
/// Bumping it makes any search started earlier come back `Superseded`.
#[derive(Clone)]
pub struct SessionHandle {
    generation: Arc<AtomicU64>,
}

impl SessionHandle {
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct SearchSession {
    backend: Arc<dyn SearchBackend>,
    vocab: Arc<Vocabulary>,
    generation: Arc<AtomicU64>,
    bag: FilterBag,
    selected: Vec<Company>,
    phase: Phase,
}

impl SearchSession {
    pub fn new(backend: Arc<dyn SearchBackend>, vocab: Arc<Vocabulary>) -> Self {
        Self {
            backend,
            vocab,
            generation: Arc::new(AtomicU64::new(0)),
            bag: FilterBag::default(),
            selected: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            generation: Arc::clone(&self.generation),
        }
    }

    /// Replaces the canonical filter state wholesale. Clears any prior
    /// selection, invalidates in-flight work, and reports whether the new
    /// state should auto-run.
    pub fn apply_filters(&mut self, bag: FilterBag) -> Trigger {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let trigger = if bag.source() == Some(FilterSource::Sidebar) {
            Trigger::Auto
        } else {
            Trigger::Manual
        };
        self.bag = bag;
        self.selected.clear();
        self.phase = Phase::AwaitingSearch;
        trigger
    }

    /// Runs the company-search phase for one page. Pages beyond the end are
    /// clamped back to the last valid page and replayed; the collaborator's
    /// past-the-end reply walks back one page at a time.
    pub async fn search_companies(&mut self, page: u32) -> Result<CompanyPage, SearchError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let plan = classify::plan(&self.bag);
        let mut normalized = normalize_company_filters(&self.bag, &self.vocab);

        if let Some(company_names) = &plan.company_name_keyword {
            // Best-effort lookup of the mentioned employer by name. Goes in
            // before the sanitize pass so it is held to the same
            // one-keyword rule as user keywords.
            normalized
                .filters
                .retain(|f| f.filter_type != FilterType::Keyword);
            normalized
                .filters
                .push(ApiFilter::terms(FilterType::Keyword, company_names.clone()));
        }

        normalized.filters = classify::sanitize_company_filters(
            normalized.filters,
            &normalized.region_names,
            &self.vocab,
        );

        if normalized.is_empty() {
            info!(
                people_focused = plan.people_focused,
                "nothing to send, staying in awaiting-search"
            );
            return Err(SearchError::EmptyFilterSet {
                people_focused: plan.people_focused,
            });
        }

        let mut page = page.max(1);
        let mut clamped = false;
        loop {
            let request = CompanySearchRequest {
                filters: normalized.filters.clone(),
                page,
                page_size: COMPANY_PAGE_SIZE,
                region_ids: normalized.region_ids.clone(),
                region_names: normalized.region_names.clone(),
            };
            let outcome = self.backend.company_search(&request).await;
            if self.generation.load(Ordering::SeqCst) != generation {
                return Err(SearchError::Superseded);
            }
            match outcome {
                Ok(response) => {
                    let total = response.total();
                    let total_pages = page_count(total, COMPANY_PAGE_SIZE);
                    if page > total_pages && !clamped {
                        debug!(page, total_pages, "page past the end, clamping");
                        page = total_pages;
                        clamped = true;
                        continue;
                    }
                    self.phase = Phase::CompanySearch;
                    return Ok(CompanyPage {
                        companies: response.into_companies(),
                        total_count: total,
                        page,
                        total_pages,
                    });
                }
                Err(SearchError::NoMoreResults) if page > 1 => {
                    debug!(page, "no more results, falling back one page");
                    page -= 1;
                }
                Err(SearchError::NoMoreResults) => {
                    self.phase = Phase::CompanySearch;
                    return Ok(CompanyPage {
                        companies: Vec::new(),
                        total_count: 0,
                        page: 1,
                        total_pages: 1,
                    });
                }
                // Filter state and prior results stay untouched so the
                // caller can retry without re-entering anything.
                Err(err) => return Err(err),
            }
        }
    }

    pub fn select_companies(&mut self, companies: Vec<Company>) {
        self.selected = companies;
        if !self.selected.is_empty() {
            self.phase = Phase::ContactSearch;
        }
    }

    pub fn selected_companies(&self) -> &[Company] {
        &self.selected
    }

    /// Runs the contact-search phase against the selected companies.
    pub async fn search_contacts(&mut self, page: u32) -> Result<ContactPage, SearchError> {
        if self.selected.is_empty() {
            return Err(SearchError::NoCompaniesSelected);
        }
        let generation = self.generation.load(Ordering::SeqCst);

        let identifiers: Vec<String> = self
            .selected
            .iter()
            .filter_map(Company::identifier)
            .collect();
        let mut filters = vec![ApiFilter::terms(FilterType::CurrentCompany, identifiers)];

        let job_titles = self.bag.list(FilterType::CurrentTitle);
        let post_processing = if job_titles.is_empty() {
            None
        } else {
            filters.push(ApiFilter::terms(
                FilterType::CurrentTitle,
                job_titles.to_vec(),
            ));
            // Loosen exact-title matching so near-miss titles still surface.
            Some(PostProcessing {
                strict_title_and_company_match: false,
            })
        };
        filters.extend(normalize_person_filters(&self.bag).filters);

        let mut page = page.max(1);
        let mut clamped = false;
        loop {
            let request = PersonSearchRequest {
                filters: filters.clone(),
                page,
                limit: CONTACT_PAGE_SIZE,
                post_processing: post_processing.clone(),
            };
            let outcome = self.backend.person_search(&request).await;
            if self.generation.load(Ordering::SeqCst) != generation {
                return Err(SearchError::Superseded);
            }
            match outcome {
                Ok(response) => {
                    let total = response
                        .total_display_count
                        .unwrap_or(response.profiles.len() as u64);
                    let total_pages =
                        page_count(total, CONTACT_PAGE_SIZE).min(CONTACT_PAGE_CAP);
                    if page > total_pages && !clamped {
                        page = total_pages;
                        clamped = true;
                        continue;
                    }
                    return Ok(ContactPage {
                        profiles: response.profiles,
                        total_count: total,
                        page,
                        total_pages,
                    });
                }
                Err(SearchError::NoMoreResults) if page > 1 => page -= 1,
                Err(SearchError::NoMoreResults) => {
                    return Ok(ContactPage {
                        profiles: Vec::new(),
                        total_count: 0,
                        page: 1,
                        total_pages: 1,
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::client::{CompanySearchResponse, PersonSearchResponse};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type Hook = Box<dyn Fn() + Send + Sync>;

    #[derive(Default)]
    struct MockBackend {
        company_replies: Mutex<VecDeque<Result<CompanySearchResponse, SearchError>>>,
        person_replies: Mutex<VecDeque<Result<PersonSearchResponse, SearchError>>>,
        company_requests: Mutex<Vec<CompanySearchRequest>>,
        person_requests: Mutex<Vec<PersonSearchRequest>>,
        on_company_call: Mutex<Option<Hook>>,
    }

    impl MockBackend {
        fn push_companies(&self, count: usize, total: u64) {
            let companies = (0..count)
                .map(|i| Company {
                    name: Some(format!("Company {i}")),
                    domain: Some(format!("company{i}.com")),
                    ..Default::default()
                })
                .collect();
            self.company_replies
                .lock()
                .unwrap()
                .push_back(Ok(CompanySearchResponse {
                    companies,
                    total_count: Some(total),
                    ..Default::default()
                }));
        }

        fn push_company_error(&self, err: SearchError) {
            self.company_replies.lock().unwrap().push_back(Err(err));
        }

        fn push_profiles(&self, count: usize, total: u64) {
            let profiles = (0..count)
                .map(|i| serde_json::json!({"name": format!("Person {i}")}))
                .collect();
            self.person_replies
                .lock()
                .unwrap()
                .push_back(Ok(PersonSearchResponse {
                    profiles,
                    total_display_count: Some(total),
                }));
        }
    }

    #[async_trait::async_trait]
    impl SearchBackend for MockBackend {
        async fn company_search(
            &self,
            request: &CompanySearchRequest,
        ) -> Result<CompanySearchResponse, SearchError> {
            self.company_requests.lock().unwrap().push(request.clone());
            if let Some(hook) = self.on_company_call.lock().unwrap().as_ref() {
                hook();
            }
            self.company_replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(CompanySearchResponse::default()))
        }

        async fn person_search(
            &self,
            request: &PersonSearchRequest,
        ) -> Result<PersonSearchResponse, SearchError> {
            self.person_requests.lock().unwrap().push(request.clone());
            self.person_replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(PersonSearchResponse::default()))
        }
    }

    fn session_with(backend: Arc<MockBackend>) -> SearchSession {
        SearchSession::new(backend, Arc::new(Vocabulary::builtin()))
    }

    fn bag(entries: &[(FilterType, &[&str])], source: FilterSource) -> FilterBag {
        use crate::filters::FilterValue;
        let mut bag = FilterBag::new(source);
        for (field, values) in entries {
            bag.set(
                *field,
                FilterValue::list(values.iter().map(|v| v.to_string()).collect()),
            );
        }
        bag
    }

    #[test]
    fn test_sidebar_apply_auto_runs_query_parse_does_not() {
        let backend = Arc::new(MockBackend::default());
        let mut session = session_with(backend);
        let sidebar = bag(&[(FilterType::Industry, &["Banking"])], FilterSource::Sidebar);
        assert_eq!(session.apply_filters(sidebar), Trigger::Auto);
        let parsed = bag(
            &[(FilterType::Industry, &["Banking"])],
            FilterSource::QueryParser,
        );
        assert_eq!(session.apply_filters(parsed), Trigger::Manual);
        assert_eq!(session.phase(), Phase::AwaitingSearch);
    }

    #[tokio::test]
    async fn test_company_search_normalizes_and_paginates() {
        let backend = Arc::new(MockBackend::default());
        backend.push_companies(10, 25);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[
                (FilterType::Industry, &["fintech"]),
                (FilterType::Region, &["nyc"]),
            ],
            FilterSource::QueryParser,
        ));

        let page = session.search_companies(1).await.unwrap();
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(session.phase(), Phase::CompanySearch);

        let request = &backend.company_requests.lock().unwrap()[0];
        assert_eq!(request.page_size, 10);
        assert_eq!(request.region_names, vec!["New York City Metropolitan Area"]);
        assert_eq!(request.region_ids, vec!["90000070"]);
        let industry = request
            .filters
            .iter()
            .find(|f| f.filter_type == FilterType::Industry)
            .unwrap();
        assert_eq!(industry.term_values(), &["Financial Services"]);
    }

    #[tokio::test]
    async fn test_empty_filter_set_is_soft_and_skips_backend() {
        let backend = Arc::new(MockBackend::default());
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[(FilterType::CurrentTitle, &["Director"])],
            FilterSource::QueryParser,
        ));

        let result = session.search_companies(1).await;
        assert!(matches!(
            result,
            Err(SearchError::EmptyFilterSet {
                people_focused: true
            })
        ));
        assert!(backend.company_requests.lock().unwrap().is_empty());
        assert_eq!(session.phase(), Phase::AwaitingSearch);
    }

    #[tokio::test]
    async fn test_current_company_synthesizes_keyword_lookup() {
        let backend = Arc::new(MockBackend::default());
        backend.push_companies(1, 1);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[
                (FilterType::CurrentTitle, &["Director"]),
                (FilterType::CurrentCompany, &["Google"]),
            ],
            FilterSource::QueryParser,
        ));

        session.search_companies(1).await.unwrap();
        let request = &backend.company_requests.lock().unwrap()[0];
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters[0].filter_type, FilterType::Keyword);
        assert_eq!(request.filters[0].term_values(), &["Google"]);
    }

    #[tokio::test]
    async fn test_multi_company_keyword_lookup_sends_single_value() {
        let backend = Arc::new(MockBackend::default());
        backend.push_companies(1, 1);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[
                (FilterType::CurrentTitle, &["Director"]),
                (FilterType::CurrentCompany, &["Google", "Meta"]),
            ],
            FilterSource::QueryParser,
        ));

        session.search_companies(1).await.unwrap();
        let request = &backend.company_requests.lock().unwrap()[0];
        let keyword = request
            .filters
            .iter()
            .find(|f| f.filter_type == FilterType::Keyword)
            .unwrap();
        // The company search never carries more than one keyword value.
        assert_eq!(keyword.term_values(), &["Google"]);
    }

    #[tokio::test]
    async fn test_page_past_end_clamps_and_replays() {
        let backend = Arc::new(MockBackend::default());
        backend.push_companies(10, 25);
        backend.push_companies(5, 25);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[(FilterType::Industry, &["Banking"])],
            FilterSource::QueryParser,
        ));

        let page = session.search_companies(9).await.unwrap();
        assert_eq!(page.page, 3);
        let requests = backend.company_requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].page, 9);
        assert_eq!(requests[1].page, 3);
    }

    #[tokio::test]
    async fn test_no_more_results_falls_back_to_previous_page() {
        let backend = Arc::new(MockBackend::default());
        backend.push_company_error(SearchError::NoMoreResults);
        backend.push_companies(10, 20);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[(FilterType::Industry, &["Banking"])],
            FilterSource::QueryParser,
        ));

        let page = session.search_companies(3).await.unwrap();
        assert_eq!(page.page, 2);
    }

    #[tokio::test]
    async fn test_no_more_results_on_first_page_is_empty_not_error() {
        let backend = Arc::new(MockBackend::default());
        backend.push_company_error(SearchError::NoMoreResults);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[(FilterType::Industry, &["Banking"])],
            FilterSource::QueryParser,
        ));

        let page = session.search_companies(1).await.unwrap();
        assert!(page.companies.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn test_invalidation_supersedes_in_flight_search() {
        let backend = Arc::new(MockBackend::default());
        backend.push_companies(10, 100);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[(FilterType::Industry, &["Banking"])],
            FilterSource::QueryParser,
        ));

        let handle = session.handle();
        *backend.on_company_call.lock().unwrap() = Some(Box::new(move || handle.invalidate()));

        let result = session.search_companies(1).await;
        assert!(matches!(result, Err(SearchError::Superseded)));
    }

    #[tokio::test]
    async fn test_contact_search_requires_selection() {
        let backend = Arc::new(MockBackend::default());
        let mut session = session_with(backend);
        let result = session.search_contacts(1).await;
        assert!(matches!(result, Err(SearchError::NoCompaniesSelected)));
    }

    #[tokio::test]
    async fn test_contact_search_builds_identifier_and_title_filters() {
        let backend = Arc::new(MockBackend::default());
        backend.push_profiles(20, 412);
        let mut session = session_with(Arc::clone(&backend));
        session.apply_filters(bag(
            &[
                (FilterType::CurrentTitle, &["CFO"]),
                (FilterType::SeniorityLevel, &["Senior"]),
            ],
            FilterSource::QueryParser,
        ));
        session.select_companies(vec![
            Company {
                domain: Some("www.acme.com".into()),
                ..Default::default()
            },
            Company {
                website: Some("https://globex.io".into()),
                ..Default::default()
            },
        ]);
        assert_eq!(session.phase(), Phase::ContactSearch);

        let page = session.search_contacts(1).await.unwrap();
        assert_eq!(page.total_count, 412);
        assert_eq!(page.total_pages, 21);

        let requests = backend.person_requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.limit, 20);
        let company = request
            .filters
            .iter()
            .find(|f| f.filter_type == FilterType::CurrentCompany)
            .unwrap();
        assert_eq!(company.term_values(), &["acme.com", "globex.io"]);
        let title = request
            .filters
            .iter()
            .find(|f| f.filter_type == FilterType::CurrentTitle)
            .unwrap();
        assert_eq!(title.term_values(), &["CFO"]);
        assert!(request
            .filters
            .iter()
            .any(|f| f.filter_type == FilterType::SeniorityLevel));
        assert_eq!(
            request
                .post_processing
                .as_ref()
                .unwrap()
                .strict_title_and_company_match,
            false
        );
    }

    #[tokio::test]
    async fn test_contact_pages_cap_at_fifty() {
        let backend = Arc::new(MockBackend::default());
        backend.push_profiles(20, 5000);
        let mut session = session_with(Arc::clone(&backend));
        session.select_companies(vec![Company {
            name: Some("Acme".into()),
            ..Default::default()
        }]);

        let page = session.search_contacts(1).await.unwrap();
        assert_eq!(page.total_pages, 50);
    }

    #[tokio::test]
    async fn test_contact_search_without_titles_omits_post_processing() {
        let backend = Arc::new(MockBackend::default());
        backend.push_profiles(1, 1);
        let mut session = session_with(Arc::clone(&backend));
        session.select_companies(vec![Company {
            name: Some("Acme".into()),
            ..Default::default()
        }]);

        session.search_contacts(1).await.unwrap();
        let requests = backend.person_requests.lock().unwrap();
        assert!(requests[0].post_processing.is_none());
    }

    #[tokio::test]
    async fn test_apply_filters_clears_selection() {
        let backend = Arc::new(MockBackend::default());
        let mut session = session_with(backend);
        session.select_companies(vec![Company {
            name: Some("Acme".into()),
            ..Default::default()
        }]);
        session.apply_filters(bag(
            &[(FilterType::Industry, &["Banking"])],
            FilterSource::Sidebar,
        ));
        assert!(session.selected_companies().is_empty());
    }
}
