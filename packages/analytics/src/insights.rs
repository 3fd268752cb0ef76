//! Headline dashboard metrics.
//!
//! Everything here is derived from a [`Summary`] alone. Regional figures
//! apportion the national totals by each region's share of projects, so
//! they are estimates rather than per-region aggregates.

use energy_map_analytics_models::{Insights, RegionOpportunity, Summary};

use crate::filter::is_district_heating;

const STORAGE_KEYWORDS: [&str; 2] = ["battery", "storage"];

const FAILED_STATUS_KEYWORDS: [&str; 3] = ["Refused", "Withdrawn", "Expired"];

const SOLAR_PV_LABEL: &str = "Solar Photovoltaics";

/// Share of projects assumed to be led by local authorities.
const LOCAL_AUTHORITY_SHARE: f64 = 0.25;

/// Rough market value per MW of installed capacity, in millions of pounds.
const MARKET_VALUE_PER_MW: f64 = 1.2;

/// Regions kept in [`Insights::region_opportunities`].
const MAX_REGION_OPPORTUNITIES: usize = 5;

/// Highest opportunity score.
pub const MAX_OPPORTUNITY_SCORE: u64 = 10;

/// Derives [`Insights`] from a summary's breakdowns.
///
/// Ratios and regional estimates are zero or empty for an empty summary.
#[must_use]
pub fn insights(summary: &Summary) -> Insights {
    let district_heating_projects = summary
        .technology_breakdown
        .iter()
        .filter(|(technology, _)| is_district_heating(technology))
        .map(|(_, count)| count)
        .sum();

    let storage_projects = summary
        .technology_breakdown
        .iter()
        .filter(|(technology, _)| {
            let lower = technology.to_lowercase();
            STORAGE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .map(|(_, count)| count)
        .sum::<u64>();

    let failed_projects = summary
        .status_breakdown
        .iter()
        .filter(|(status, _)| {
            FAILED_STATUS_KEYWORDS
                .iter()
                .any(|keyword| status.contains(keyword))
        })
        .map(|(_, count)| count)
        .sum();

    let solar_projects = summary
        .technology_breakdown
        .get(SOLAR_PV_LABEL)
        .copied()
        .unwrap_or(0);

    let region_opportunities = region_opportunities(summary);

    Insights {
        district_heating_projects,
        storage_projects,
        local_authority_projects: round_u64(as_f64(summary.total_projects) * LOCAL_AUTHORITY_SHARE),
        solar_integration_opportunities: solar_projects.min(storage_projects.saturating_mul(2)),
        multi_tech_areas: region_opportunities.len() as u64,
        failed_projects,
        average_project_size: average_project_size(summary),
        planning_success_rate: planning_success_rate(summary),
        total_market_value: round_i64(as_f64_signed(summary.total_capacity) * MARKET_VALUE_PER_MW),
        region_opportunities,
    }
}

/// Scores a region from 0 to [`MAX_OPPORTUNITY_SCORE`].
///
/// Weighs market size (3 per thousand projects), district heating potential
/// (2 per ten biomass projects), and planning success (3 at 100%), plus a
/// bonus of 2 for regions over a thousand projects and 1 otherwise.
#[must_use]
pub fn opportunity_score(project_count: u64, biomass_count: u64, success_rate: u64) -> u64 {
    let market_bonus = if project_count > 1000 { 2.0 } else { 1.0 };
    let raw = as_f64(project_count) / 1000.0 * 3.0
        + as_f64(biomass_count) / 10.0 * 2.0
        + as_f64(success_rate) / 100.0 * 3.0
        + market_bonus;
    round_u64(raw).min(MAX_OPPORTUNITY_SCORE)
}

/// Estimates every region, then keeps the highest scoring few. Equal
/// scores keep region order.
fn region_opportunities(summary: &Summary) -> Vec<RegionOpportunity> {
    if summary.total_projects == 0 {
        return Vec::new();
    }

    let total = as_f64(summary.total_projects);
    let biomass_counts: Vec<u64> = summary
        .technology_breakdown
        .iter()
        .filter(|(technology, _)| technology.to_lowercase().contains("biomass"))
        .map(|(_, count)| *count)
        .collect();

    let mut opportunities: Vec<RegionOpportunity> = summary
        .region_breakdown
        .iter()
        .map(|(region, &project_count)| {
            let share = as_f64(project_count) / total;
            let biomass_count = biomass_counts
                .iter()
                .map(|&count| round_u64(as_f64(count) * share))
                .sum();
            let operational = round_u64(as_f64(summary.operational_projects) * share);
            let success_rate = if project_count == 0 {
                0
            } else {
                round_u64(as_f64(operational) / as_f64(project_count) * 100.0)
            };

            RegionOpportunity {
                region: region.clone(),
                project_count,
                biomass_count,
                success_rate,
                opportunity_score: opportunity_score(project_count, biomass_count, success_rate),
                capacity: round_i64(as_f64_signed(summary.total_capacity) * share),
            }
        })
        .collect();

    opportunities.sort_by(|a, b| b.opportunity_score.cmp(&a.opportunity_score));
    opportunities.truncate(MAX_REGION_OPPORTUNITIES);
    opportunities
}

fn average_project_size(summary: &Summary) -> i64 {
    if summary.total_projects == 0 {
        return 0;
    }
    round_i64(as_f64_signed(summary.total_capacity) / as_f64(summary.total_projects))
}

fn planning_success_rate(summary: &Summary) -> u64 {
    if summary.total_projects == 0 {
        return 0;
    }
    round_u64(as_f64(summary.operational_projects) / as_f64(summary.total_projects) * 100.0)
}

#[allow(clippy::cast_precision_loss)]
const fn as_f64(value: u64) -> f64 {
    value as f64
}

#[allow(clippy::cast_precision_loss)]
const fn as_f64_signed(value: i64) -> f64 {
    value as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_u64(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

#[allow(clippy::cast_possible_truncation)]
fn round_i64(value: f64) -> i64 {
    value.round() as i64
}
