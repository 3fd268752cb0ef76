//! Filter option lists derived from a summary.

use energy_map_analytics_models::{FilterOptions, Summary};

/// Lists the regions, technologies, and statuses present in `summary`.
///
/// Breakdown keys are already unique and ordered, so each list comes out
/// sorted ascending.
#[must_use]
pub fn filter_options(summary: &Summary) -> FilterOptions {
    FilterOptions {
        regions: summary.region_breakdown.keys().cloned().collect(),
        technologies: summary.technology_breakdown.keys().cloned().collect(),
        statuses: summary.status_breakdown.keys().cloned().collect(),
    }
}
