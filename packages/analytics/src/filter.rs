//! Multi-axis project filtering.
//!
//! Region and status match exactly; technology matches as a case-insensitive
//! substring or through the district heating composite. Filters borrow from
//! the input and keep its order, so the same criteria over the same
//! collection always give the same view.

use energy_map_analytics_models::{FilterCriteria, Summary, TechnologyFilter};
use energy_map_project_models::EnergyProject;

use crate::summary::summarize;

/// Lowercase fragments that place a technology in the district heating &
/// CHP composite.
pub const DISTRICT_HEATING_KEYWORDS: [&str; 3] = ["biomass", "chp", "combined heat"];

/// Whether `technology` belongs to the district heating & CHP composite.
#[must_use]
pub fn is_district_heating(technology: &str) -> bool {
    let lower = technology.to_lowercase();
    DISTRICT_HEATING_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Whether `technology` passes the technology axis of a filter.
#[must_use]
pub fn technology_matches(filter: &TechnologyFilter, technology: &str) -> bool {
    match filter {
        TechnologyFilter::All => true,
        TechnologyFilter::Contains(needle) => technology
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        TechnologyFilter::DistrictHeatingChp => is_district_heating(technology),
    }
}

/// Whether a single project passes every axis of `criteria`.
#[must_use]
pub fn matches(project: &EnergyProject, criteria: &FilterCriteria) -> bool {
    if let Some(region) = &criteria.region
        && project.region != *region
    {
        return false;
    }

    if let Some(status) = &criteria.status
        && project.development_status_short != *status
    {
        return false;
    }

    technology_matches(&criteria.technology, &project.technology_type)
}

/// Returns the projects passing `criteria`, in input order.
#[must_use]
pub fn filter<'a>(projects: &'a [EnergyProject], criteria: &FilterCriteria) -> Vec<&'a EnergyProject> {
    if criteria.is_unrestricted() {
        return projects.iter().collect();
    }

    let filtered: Vec<&EnergyProject> = projects
        .iter()
        .filter(|project| matches(project, criteria))
        .collect();

    log::debug!(
        "Filter {criteria:?} kept {} of {} projects",
        filtered.len(),
        projects.len()
    );

    filtered
}

/// Filters `projects` and summarizes the result.
#[must_use]
pub fn filtered_summary(projects: &[EnergyProject], criteria: &FilterCriteria) -> Summary {
    summarize(filter(projects, criteria))
}
