//! Map marker selection.
//!
//! Map rendering has a hard ceiling on how many points it can draw at once.
//! When more projects match than the cap allows, the largest projects by
//! installed capacity are kept.

use energy_map_analytics_models::{FilterCriteria, GeoQuery, MarkerView};
use energy_map_project_models::EnergyProject;
use energy_map_spatial::to_geo_point;

use crate::filter::matches;
use crate::palette::{status_color, technology_color};

/// Returns the projects whose grid coordinates convert to a valid point.
#[must_use]
pub fn with_valid_coordinates(projects: &[EnergyProject]) -> Vec<&EnergyProject> {
    projects.iter().filter(|p| has_valid_position(p)).collect()
}

fn has_valid_position(project: &EnergyProject) -> bool {
    to_geo_point(project.x_coordinate, project.y_coordinate).is_some()
}

/// Sort key for selection. Non-finite capacities rank below every real
/// value, so the `0.0` sentinel sorts after every positive capacity.
fn capacity_rank(project: &EnergyProject) -> f64 {
    let capacity = project.installed_capacity;
    if capacity.is_finite() {
        capacity
    } else {
        f64::NEG_INFINITY
    }
}

/// Selects at most `cap` projects for the map.
///
/// Keeps projects with a valid position that pass `criteria`, orders them
/// by installed capacity (largest first, unknown capacity last, ties in
/// input order), and takes the first `cap`.
#[must_use]
pub fn select<'a>(
    projects: &'a [EnergyProject],
    criteria: &FilterCriteria,
    cap: usize,
) -> Vec<&'a EnergyProject> {
    let mut eligible: Vec<&EnergyProject> = projects
        .iter()
        .filter(|p| has_valid_position(p) && matches(p, criteria))
        .collect();

    let eligible_count = eligible.len();

    // `sort_by` is stable, so equal capacities keep input order.
    eligible.sort_by(|a, b| capacity_rank(b).total_cmp(&capacity_rank(a)));
    eligible.truncate(cap);

    if eligible.len() < eligible_count {
        log::debug!(
            "Marker cap {cap} reached: showing {} of {eligible_count} projects",
            eligible.len()
        );
    }

    eligible
}

/// Selects projects for `query` and prepares them for display.
#[must_use]
pub fn markers(projects: &[EnergyProject], query: &GeoQuery) -> Vec<MarkerView> {
    select(projects, &query.criteria, query.cap)
        .into_iter()
        .filter_map(marker_view)
        .collect()
}

fn marker_view(project: &EnergyProject) -> Option<MarkerView> {
    let position = to_geo_point(project.x_coordinate, project.y_coordinate)?;
    Some(MarkerView {
        ref_id: project.ref_id.clone(),
        site_name: project.site_name.clone(),
        operator: project.operator.clone(),
        technology_type: project.technology_type.clone(),
        development_status_short: project.development_status_short.clone(),
        county: project.county.clone(),
        installed_capacity: project.installed_capacity,
        position,
        technology_color: technology_color(&project.technology_type).to_owned(),
        status_color: status_color(&project.development_status_short).to_owned(),
    })
}
