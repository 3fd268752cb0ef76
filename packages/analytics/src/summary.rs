//! Aggregate statistics over a project collection.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use energy_map_analytics_models::Summary;
use energy_map_project_models::EnergyProject;

/// Computes a fresh [`Summary`] over `projects` in a single pass.
///
/// Accepts anything that yields projects or references to them, so both the
/// canonical collection (`&[EnergyProject]`) and a filtered view
/// (`Vec<&EnergyProject>`) can be summarized. An empty collection yields
/// [`Summary::default`].
#[must_use]
pub fn summarize<P>(projects: impl IntoIterator<Item = P>) -> Summary
where
    P: Borrow<EnergyProject>,
{
    let mut technology_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    let mut status_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    let mut region_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_projects: u64 = 0;
    let mut operational_projects: u64 = 0;
    let mut capacity_sum = 0.0_f64;

    for project in projects {
        let project = project.borrow();
        total_projects += 1;

        count_label(&mut technology_breakdown, &project.technology_type);
        count_label(&mut status_breakdown, &project.development_status_short);
        count_label(&mut region_breakdown, &project.region);

        if project.installed_capacity.is_finite() {
            capacity_sum += project.installed_capacity;
        }

        if project.is_operational() {
            operational_projects += 1;
        }
    }

    Summary {
        total_projects,
        total_capacity: round_capacity(capacity_sum),
        operational_projects,
        unique_technologies: technology_breakdown.len() as u64,
        technology_breakdown,
        status_breakdown,
        region_breakdown,
    }
}

/// Adds one to `label`'s count, ignoring the empty "absent" label.
fn count_label(breakdown: &mut BTreeMap<String, u64>, label: &str) {
    if label.is_empty() {
        return;
    }
    if let Some(count) = breakdown.get_mut(label) {
        *count += 1;
    } else {
        breakdown.insert(label.to_owned(), 1);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_capacity(sum: f64) -> i64 {
    sum.round() as i64
}
