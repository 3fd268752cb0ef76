#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Summary, filter, and map marker types for the energy project dashboard.
//!
//! Every value here is a snapshot: summaries and markers are produced fresh
//! from a project collection and never updated in place.

use std::collections::BTreeMap;

use energy_map_spatial::GeoPoint;
use serde::{Deserialize, Serialize};

/// Wire value meaning "no filter on this axis".
pub const ALL_SELECTION: &str = "all";

/// Technology selection label for the district heating & CHP composite.
pub const DISTRICT_HEATING_LABEL: &str = "District Heating & CHP";

/// Marker cap used when a geographic query does not give one.
pub const DEFAULT_MARKER_CAP: usize = 1000;

/// Aggregate statistics over a project collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of projects in the collection.
    pub total_projects: u64,
    /// Sum of installed capacity (MW), rounded once to the nearest integer.
    pub total_capacity: i64,
    /// Projects whose short status is `Operational`.
    pub operational_projects: u64,
    /// Number of distinct non-empty technology types.
    pub unique_technologies: u64,
    /// Project count per non-empty technology type.
    pub technology_breakdown: BTreeMap<String, u64>,
    /// Project count per non-empty short development status.
    pub status_breakdown: BTreeMap<String, u64>,
    /// Project count per non-empty region.
    pub region_breakdown: BTreeMap<String, u64>,
}

/// The technology axis of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TechnologyFilter {
    /// No restriction.
    #[default]
    All,
    /// Technology type contains the text, ignoring case.
    Contains(String),
    /// Biomass, CHP, or combined heat technologies.
    DistrictHeatingChp,
}

impl TechnologyFilter {
    /// Interprets a wire selection.
    ///
    /// `""` and `"all"` (any case) mean no restriction;
    /// [`DISTRICT_HEATING_LABEL`] (any case) selects the composite.
    #[must_use]
    pub fn from_selection(selection: &str) -> Self {
        let selection = selection.trim();
        if is_all(selection) {
            Self::All
        } else if selection.eq_ignore_ascii_case(DISTRICT_HEATING_LABEL) {
            Self::DistrictHeatingChp
        } else {
            Self::Contains(selection.to_owned())
        }
    }
}

/// Independent filter predicates, combined with logical AND.
///
/// `None` (or [`TechnologyFilter::All`]) passes every project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact region.
    pub region: Option<String>,
    /// Technology restriction.
    pub technology: TechnologyFilter,
    /// Exact short development status.
    pub status: Option<String>,
}

impl FilterCriteria {
    /// Criteria that pass every project.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds criteria from the three wire selections, where `""` and
    /// `"all"` mean no restriction.
    #[must_use]
    pub fn from_selections(region: &str, technology: &str, status: &str) -> Self {
        Self {
            region: exact_selection(region),
            technology: TechnologyFilter::from_selection(technology),
            status: exact_selection(status),
        }
    }

    /// Restricts to an exact region.
    #[must_use]
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_owned());
        self
    }

    /// Restricts the technology axis.
    #[must_use]
    pub fn with_technology(mut self, technology: TechnologyFilter) -> Self {
        self.technology = technology;
        self
    }

    /// Restricts to an exact short development status.
    #[must_use]
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_owned());
        self
    }

    /// Whether every axis is unrestricted.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.region.is_none() && self.technology == TechnologyFilter::All && self.status.is_none()
    }
}

fn is_all(selection: &str) -> bool {
    selection.is_empty() || selection.eq_ignore_ascii_case(ALL_SELECTION)
}

fn exact_selection(selection: &str) -> Option<String> {
    let selection = selection.trim();
    (!is_all(selection)).then(|| selection.to_owned())
}

/// A geographic marker query: filter criteria plus a marker cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoQuery {
    /// Which projects are eligible.
    pub criteria: FilterCriteria,
    /// Maximum number of markers returned.
    pub cap: usize,
}

impl GeoQuery {
    /// Creates a query with the given criteria and cap.
    #[must_use]
    pub const fn new(criteria: FilterCriteria, cap: usize) -> Self {
        Self { criteria, cap }
    }
}

impl Default for GeoQuery {
    fn default() -> Self {
        Self::new(FilterCriteria::all(), DEFAULT_MARKER_CAP)
    }
}

/// A project prepared for display on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    /// Source identifier, used as the display key.
    pub ref_id: String,
    /// Site name.
    pub site_name: String,
    /// Operator or applicant.
    pub operator: String,
    /// Technology type.
    pub technology_type: String,
    /// Short development status.
    pub development_status_short: String,
    /// County.
    pub county: String,
    /// Installed capacity (MW).
    pub installed_capacity: f64,
    /// Converted position.
    pub position: GeoPoint,
    /// Marker colour (hex), by technology.
    pub technology_color: String,
    /// Badge colour (hex), by short development status.
    pub status_color: String,
}

/// Available filter values, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Regions present in the data.
    pub regions: Vec<String>,
    /// Technology types present in the data.
    pub technologies: Vec<String>,
    /// Short development statuses present in the data.
    pub statuses: Vec<String>,
}

/// Opportunity estimate for one region.
///
/// Per-region figures other than `project_count` are apportioned from the
/// national totals by the region's share of projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionOpportunity {
    /// Region label.
    pub region: String,
    /// Projects in the region.
    pub project_count: u64,
    /// Estimated biomass projects in the region.
    pub biomass_count: u64,
    /// Estimated operational share in the region, as a rounded percentage.
    pub success_rate: u64,
    /// Opportunity score from 0 to 10.
    pub opportunity_score: u64,
    /// Estimated installed capacity in the region (MW).
    pub capacity: i64,
}

/// Headline metrics for the dashboard, derived from a [`Summary`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Projects whose technology is biomass, CHP, or combined heat.
    pub district_heating_projects: u64,
    /// Projects whose technology mentions battery or storage.
    pub storage_projects: u64,
    /// Estimated local authority led projects (a quarter of all projects).
    pub local_authority_projects: u64,
    /// Solar PV projects that storage could pair with: the smaller of the
    /// solar count and twice the storage count.
    pub solar_integration_opportunities: u64,
    /// Number of regions in [`Self::region_opportunities`].
    pub multi_tech_areas: u64,
    /// Projects refused, withdrawn, or expired.
    pub failed_projects: u64,
    /// Average capacity per project (MW), rounded.
    pub average_project_size: i64,
    /// Operational share of all projects, as a rounded percentage.
    pub planning_success_rate: u64,
    /// Rough market value in millions of pounds (1.2 per MW).
    pub total_market_value: i64,
    /// Up to five regions, highest opportunity score first.
    pub region_opportunities: Vec<RegionOpportunity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selections_are_unrestricted() {
        assert!(FilterCriteria::from_selections("all", "ALL", "").is_unrestricted());
        assert!(FilterCriteria::all().is_unrestricted());
    }

    #[test]
    fn selections_map_to_predicates() {
        let criteria =
            FilterCriteria::from_selections("Scotland", "wind", "Operational");
        assert_eq!(criteria.region.as_deref(), Some("Scotland"));
        assert_eq!(
            criteria.technology,
            TechnologyFilter::Contains("wind".to_string())
        );
        assert_eq!(criteria.status.as_deref(), Some("Operational"));
    }

    #[test]
    fn district_heating_label_selects_composite() {
        assert_eq!(
            TechnologyFilter::from_selection("District Heating & CHP"),
            TechnologyFilter::DistrictHeatingChp
        );
        assert_eq!(
            TechnologyFilter::from_selection("district heating & chp"),
            TechnologyFilter::DistrictHeatingChp
        );
    }

    #[test]
    fn builders_set_each_axis() {
        let criteria = FilterCriteria::all()
            .with_region("Wales")
            .with_technology(TechnologyFilter::DistrictHeatingChp)
            .with_status("Operational");
        assert!(!criteria.is_unrestricted());
        assert_eq!(criteria.region.as_deref(), Some("Wales"));
    }

    #[test]
    fn default_geo_query_uses_default_cap() {
        let query = GeoQuery::default();
        assert_eq!(query.cap, DEFAULT_MARKER_CAP);
        assert!(query.criteria.is_unrestricted());
    }

    #[test]
    fn empty_summary_serializes_camel_case() {
        let json = serde_json::to_value(Summary::default()).unwrap();
        assert_eq!(json["totalProjects"], 0);
        assert_eq!(json["uniqueTechnologies"], 0);
        assert!(json["technologyBreakdown"].as_object().unwrap().is_empty());
    }
}
