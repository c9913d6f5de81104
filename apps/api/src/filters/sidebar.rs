//! Sidebar reconciliation: the faceted form the UI submits, and the
//! bidirectional projection between it and the canonical filter bag.

use serde::{Deserialize, Serialize};

use super::{FilterBag, FilterSource, FilterType, FilterValue, RangeValue};

/// A min/max pair as the sidebar's range widgets submit it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundsForm {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl BoundsForm {
    fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn from_range(range: &RangeValue) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

/// The sidebar form state. Every field is optional; an empty field means the
/// user left that facet untouched and the corresponding bag entry is deleted
/// on apply, never defaulted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarForm {
    pub job_titles: Vec<String>,
    pub industries: Vec<String>,
    pub regions: Vec<String>,
    pub company_sizes: Vec<String>,
    pub revenue_range: Option<BoundsForm>,
    pub seniority_levels: Vec<String>,
    pub years_ranges: Vec<String>,
    pub growth_range: Option<BoundsForm>,
    pub departments: Vec<String>,
    pub department_size: Option<BoundsForm>,
    pub department_growth: Option<BoundsForm>,
    pub specializations: Vec<String>,
    pub account_activities: Vec<String>,
    pub current_company: Option<String>,
    pub years_at_company: Vec<String>,
    pub years_in_position: Vec<String>,
    pub job_opportunities: Vec<String>,
    pub recently_changed: Option<bool>,
    pub linkedin_posted: Option<bool>,
    pub in_the_news: Option<bool>,
}

impl SidebarForm {
    /// The department a department-scoped range applies to. Falls back to
    /// Engineering, matching the normalizer's own default.
    fn department(&self) -> String {
        self.departments
            .first()
            .cloned()
            .unwrap_or_else(|| "Engineering".to_string())
    }

    fn range_value(&self, bounds: BoundsForm, sub_filter: Option<String>) -> FilterValue {
        FilterValue::Range(RangeValue {
            min: bounds.min,
            max: bounds.max,
            sub_filter,
        })
    }

    /// Projects the form onto a fresh canonical bag tagged as sidebar-sourced.
    /// This is a wholesale replace of the previous state, not a merge.
    pub fn apply(&self) -> FilterBag {
        let mut bag = FilterBag::new(FilterSource::Sidebar);

        bag.set(FilterType::CurrentTitle, FilterValue::list(self.job_titles.clone()));
        bag.set(FilterType::Industry, FilterValue::list(self.industries.clone()));
        bag.set(FilterType::Region, FilterValue::list(self.regions.clone()));
        bag.set(FilterType::CompanyHeadcount, FilterValue::list(self.company_sizes.clone()));
        bag.set(FilterType::SeniorityLevel, FilterValue::list(self.seniority_levels.clone()));
        bag.set(FilterType::YearsOfExperience, FilterValue::list(self.years_ranges.clone()));
        bag.set(FilterType::YearsAtCurrentCompany, FilterValue::list(self.years_at_company.clone()));
        bag.set(FilterType::YearsInCurrentPosition, FilterValue::list(self.years_in_position.clone()));
        bag.set(FilterType::Tags, FilterValue::list(self.specializations.clone()));
        bag.set(FilterType::AccountActivities, FilterValue::list(self.account_activities.clone()));
        bag.set(FilterType::JobOpportunities, FilterValue::list(self.job_opportunities.clone()));

        let company: Vec<String> = self.current_company.iter().cloned().collect();
        bag.set(FilterType::CurrentCompany, FilterValue::list(company));

        if let Some(bounds) = self.revenue_range.filter(|b| !b.is_unset()) {
            bag.set(FilterType::AnnualRevenue, self.range_value(bounds, None));
        }
        if let Some(bounds) = self.growth_range.filter(|b| !b.is_unset()) {
            bag.set(FilterType::CompanyHeadcountGrowth, self.range_value(bounds, None));
        }
        if let Some(bounds) = self.department_size.filter(|b| !b.is_unset()) {
            bag.set(
                FilterType::DepartmentHeadcount,
                self.range_value(bounds, Some(self.department())),
            );
        }
        if let Some(bounds) = self.department_growth.filter(|b| !b.is_unset()) {
            bag.set(
                FilterType::DepartmentHeadcountGrowth,
                self.range_value(bounds, Some(self.department())),
            );
        }

        bag.set(FilterType::RecentlyChangedJobs, FilterValue::Toggle(self.recently_changed));
        bag.set(FilterType::PostedOnLinkedin, FilterValue::Toggle(self.linkedin_posted));
        bag.set(FilterType::InTheNews, FilterValue::Toggle(self.in_the_news));

        bag
    }

    /// The reverse projection, used to seed the sidebar after a free-text
    /// parse so both entry pathways show the same state.
    pub fn from_bag(bag: &FilterBag) -> Self {
        let range_bounds = |field| bag.range(field).map(BoundsForm::from_range);
        Self {
            job_titles: bag.list(FilterType::CurrentTitle).to_vec(),
            industries: bag.list(FilterType::Industry).to_vec(),
            regions: bag.list(FilterType::Region).to_vec(),
            company_sizes: bag.list(FilterType::CompanyHeadcount).to_vec(),
            revenue_range: range_bounds(FilterType::AnnualRevenue),
            seniority_levels: bag.list(FilterType::SeniorityLevel).to_vec(),
            years_ranges: bag.list(FilterType::YearsOfExperience).to_vec(),
            growth_range: range_bounds(FilterType::CompanyHeadcountGrowth),
            departments: bag
                .range(FilterType::DepartmentHeadcount)
                .and_then(|r| r.sub_filter.clone())
                .or_else(|| {
                    bag.range(FilterType::DepartmentHeadcountGrowth)
                        .and_then(|r| r.sub_filter.clone())
                })
                .into_iter()
                .collect(),
            department_size: range_bounds(FilterType::DepartmentHeadcount),
            department_growth: range_bounds(FilterType::DepartmentHeadcountGrowth),
            specializations: bag.list(FilterType::Tags).to_vec(),
            account_activities: bag.list(FilterType::AccountActivities).to_vec(),
            current_company: bag.list(FilterType::CurrentCompany).first().cloned(),
            years_at_company: bag.list(FilterType::YearsAtCurrentCompany).to_vec(),
            years_in_position: bag.list(FilterType::YearsInCurrentPosition).to_vec(),
            job_opportunities: bag.list(FilterType::JobOpportunities).to_vec(),
            recently_changed: bag.toggle(FilterType::RecentlyChangedJobs),
            linkedin_posted: bag.toggle(FilterType::PostedOnLinkedin),
            in_the_news: bag.toggle(FilterType::InTheNews),
        }
    }
}
