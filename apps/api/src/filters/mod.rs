//! Filter data model: the canonical filter state shared by the free-text
//! query parser and the sidebar, plus the wire shape the search API accepts.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub mod data;
pub mod normalize;
pub mod sidebar;
pub mod vocab;

/// The fixed filter tag enumeration. Serializes to the SCREAMING_SNAKE_CASE
/// names the search API and the query-parser schema use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    CurrentTitle,
    CurrentCompany,
    YearsOfExperience,
    Industry,
    Tags,
    Region,
    CompanyHeadcount,
    CompanyHeadcountGrowth,
    AnnualRevenue,
    DepartmentHeadcount,
    DepartmentHeadcountGrowth,
    AccountActivities,
    JobOpportunities,
    Keyword,
    YearsAtCurrentCompany,
    YearsInCurrentPosition,
    SeniorityLevel,
    RecentlyChangedJobs,
    PostedOnLinkedin,
    InTheNews,
    RegionIds,
}

/// The value shape a given filter tag carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    List,
    Range,
    Toggle,
}

impl FilterType {
    /// Every tag, in the order the parse-query response lists them.
    pub const ALL: &'static [FilterType] = &[
        FilterType::CurrentTitle,
        FilterType::CurrentCompany,
        FilterType::YearsOfExperience,
        FilterType::Industry,
        FilterType::Tags,
        FilterType::Region,
        FilterType::RegionIds,
        FilterType::CompanyHeadcount,
        FilterType::CompanyHeadcountGrowth,
        FilterType::AnnualRevenue,
        FilterType::DepartmentHeadcount,
        FilterType::DepartmentHeadcountGrowth,
        FilterType::AccountActivities,
        FilterType::JobOpportunities,
        FilterType::Keyword,
        FilterType::YearsAtCurrentCompany,
        FilterType::YearsInCurrentPosition,
        FilterType::SeniorityLevel,
        FilterType::RecentlyChangedJobs,
        FilterType::PostedOnLinkedin,
        FilterType::InTheNews,
    ];

    pub fn shape(self) -> ValueShape {
        match self {
            FilterType::CompanyHeadcountGrowth
            | FilterType::AnnualRevenue
            | FilterType::DepartmentHeadcount
            | FilterType::DepartmentHeadcountGrowth => ValueShape::Range,
            FilterType::RecentlyChangedJobs
            | FilterType::PostedOnLinkedin
            | FilterType::InTheNews => ValueShape::Toggle,
            _ => ValueShape::List,
        }
    }

    /// The wire name, e.g. `CURRENT_TITLE`.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::CurrentTitle => "CURRENT_TITLE",
            FilterType::CurrentCompany => "CURRENT_COMPANY",
            FilterType::YearsOfExperience => "YEARS_OF_EXPERIENCE",
            FilterType::Industry => "INDUSTRY",
            FilterType::Tags => "TAGS",
            FilterType::Region => "REGION",
            FilterType::CompanyHeadcount => "COMPANY_HEADCOUNT",
            FilterType::CompanyHeadcountGrowth => "COMPANY_HEADCOUNT_GROWTH",
            FilterType::AnnualRevenue => "ANNUAL_REVENUE",
            FilterType::DepartmentHeadcount => "DEPARTMENT_HEADCOUNT",
            FilterType::DepartmentHeadcountGrowth => "DEPARTMENT_HEADCOUNT_GROWTH",
            FilterType::AccountActivities => "ACCOUNT_ACTIVITIES",
            FilterType::JobOpportunities => "JOB_OPPORTUNITIES",
            FilterType::Keyword => "KEYWORD",
            FilterType::YearsAtCurrentCompany => "YEARS_AT_CURRENT_COMPANY",
            FilterType::YearsInCurrentPosition => "YEARS_IN_CURRENT_POSITION",
            FilterType::SeniorityLevel => "SENIORITY_LEVEL",
            FilterType::RecentlyChangedJobs => "RECENTLY_CHANGED_JOBS",
            FilterType::PostedOnLinkedin => "POSTED_ON_LINKEDIN",
            FilterType::InTheNews => "IN_THE_NEWS",
            FilterType::RegionIds => "REGION_IDS",
        }
    }

    /// Looks a tag up by its wire name.
    pub fn from_tag(tag: &str) -> Option<FilterType> {
        Self::ALL.iter().copied().find(|ft| ft.as_str() == tag)
    }
}

/// A numeric range with an optional qualifier (currency, department).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_filter: Option<String>,
}

impl RangeValue {
    pub fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// A filter value, discriminated by shape so the normalizer pattern-matches
/// instead of duck-typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    List(Vec<String>),
    Range(RangeValue),
    /// Tri-state: `Some(true)`, `Some(false)`, or unset. An unset toggle is
    /// never collapsed to false.
    Toggle(Option<bool>),
}

impl FilterValue {
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::List(items) => items.is_empty(),
            FilterValue::Range(range) => range.is_unset(),
            FilterValue::Toggle(state) => state.is_none(),
        }
    }

    pub fn list(items: Vec<String>) -> Self {
        FilterValue::List(items)
    }
}

/// Which producer last wrote the canonical filter state. Decides auto-vs-
/// manual search triggering and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSource {
    QueryParser,
    Sidebar,
}

/// The canonical filter state. Each producer (query parser, sidebar) replaces
/// the whole bag with its own projection; unset fields are deleted rather
/// than defaulted so the two producers never fight over stale values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterBag {
    source: Option<FilterSource>,
    fields: BTreeMap<FilterType, FilterValue>,
}

impl FilterBag {
    pub fn new(source: FilterSource) -> Self {
        Self {
            source: Some(source),
            fields: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> Option<FilterSource> {
        self.source
    }

    /// Inserts a field, deleting it instead when the value is unset.
    pub fn set(&mut self, filter_type: FilterType, value: FilterValue) {
        if value.is_unset() {
            self.fields.remove(&filter_type);
        } else {
            self.fields.insert(filter_type, value);
        }
    }

    pub fn get(&self, filter_type: FilterType) -> Option<&FilterValue> {
        self.fields.get(&filter_type)
    }

    /// List-shaped accessor; absent fields read as empty.
    pub fn list(&self, filter_type: FilterType) -> &[String] {
        match self.fields.get(&filter_type) {
            Some(FilterValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn range(&self, filter_type: FilterType) -> Option<&RangeValue> {
        match self.fields.get(&filter_type) {
            Some(FilterValue::Range(range)) if !range.is_unset() => Some(range),
            _ => None,
        }
    }

    /// Tri-state accessor: `None` means unset, which is distinct from
    /// `Some(false)`.
    pub fn toggle(&self, filter_type: FilterType) -> Option<bool> {
        match self.fields.get(&filter_type) {
            Some(FilterValue::Toggle(state)) => *state,
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

// The parse-query contract always carries every key: list fields default to
// [], range and toggle fields to null, plus the `_source` discriminant.
impl Serialize for FilterBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FilterType::ALL.len() + 1))?;
        for &filter_type in FilterType::ALL {
            match self.fields.get(&filter_type) {
                Some(value) => map.serialize_entry(filter_type.as_str(), value)?,
                None => match filter_type.shape() {
                    ValueShape::List => {
                        map.serialize_entry(filter_type.as_str(), &Vec::<String>::new())?
                    }
                    ValueShape::Range | ValueShape::Toggle => {
                        map.serialize_entry(filter_type.as_str(), &Option::<bool>::None)?
                    }
                },
            }
        }
        map.serialize_entry("_source", &self.source)?;
        map.end()
    }
}

// The reverse direction keeps the delete-not-default rule: empty lists, null
// ranges, and null toggles never land in the map. Unknown keys are skipped.
impl<'de> Deserialize<'de> for FilterBag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BagVisitor;

        impl<'de> serde::de::Visitor<'de> for BagVisitor {
            type Value = FilterBag;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map keyed by filter tag names")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<FilterBag, A::Error> {
                let mut bag = FilterBag::default();
                while let Some(key) = access.next_key::<String>()? {
                    if key == "_source" {
                        bag.source = access.next_value::<Option<FilterSource>>()?;
                        continue;
                    }
                    let Some(filter_type) = FilterType::from_tag(&key) else {
                        access.next_value::<serde::de::IgnoredAny>()?;
                        continue;
                    };
                    let value = match filter_type.shape() {
                        ValueShape::List => {
                            FilterValue::List(access.next_value::<Vec<String>>()?)
                        }
                        ValueShape::Range => match access.next_value::<Option<RangeValue>>()? {
                            Some(range) => FilterValue::Range(range),
                            None => continue,
                        },
                        ValueShape::Toggle => {
                            FilterValue::Toggle(access.next_value::<Option<bool>>()?)
                        }
                    };
                    bag.set(filter_type, value);
                }
                Ok(bag)
            }
        }

        deserializer.deserialize_map(BagVisitor)
    }
}

/// Match operator on an outgoing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    In,
    Between,
}

/// Value payload of an outgoing filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiFilterValue {
    Terms(Vec<String>),
    Bounds { min: f64, max: f64 },
}

/// One filter in the shape the search API consumes:
/// `{filter_type, type, value, sub_filter?}`. Boolean filters are sent as a
/// bare `{filter_type}` with no operator or value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFilter {
    pub filter_type: FilterType,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MatchKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ApiFilterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_filter: Option<String>,
}

impl ApiFilter {
    pub fn terms(filter_type: FilterType, values: Vec<String>) -> Self {
        Self {
            filter_type,
            kind: Some(MatchKind::In),
            value: Some(ApiFilterValue::Terms(values)),
            sub_filter: None,
        }
    }

    pub fn between(filter_type: FilterType, min: f64, max: f64, sub_filter: Option<String>) -> Self {
        Self {
            filter_type,
            kind: Some(MatchKind::Between),
            value: Some(ApiFilterValue::Bounds { min, max }),
            sub_filter,
        }
    }

    pub fn flag(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            kind: None,
            value: None,
            sub_filter: None,
        }
    }

    pub fn term_values(&self) -> &[String] {
        match &self.value {
            Some(ApiFilterValue::Terms(values)) => values,
            _ => &[],
        }
    }
}

/// A non-fatal record of values rejected during normalization. Logged and
/// attached to responses for audit; never aborts a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub field: FilterType,
    pub rejected: Vec<String>,
    pub message: String,
}
