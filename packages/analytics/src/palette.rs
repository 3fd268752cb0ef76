//! Display colours for technologies and development statuses.

/// Colour used when nothing in a palette matches.
pub const DEFAULT_COLOR: &str = "#6B7280";

/// Technology palette, checked in order. More specific keys come first so
/// `Wind Offshore` wins over `Wind`.
const TECHNOLOGY_COLORS: [(&str, &str); 12] = [
    ("Solar Photovoltaics", "#F59E0B"),
    ("Solar", "#F59E0B"),
    ("Wind Onshore", "#10B981"),
    ("Wind Offshore", "#3B82F6"),
    ("Wind", "#10B981"),
    ("Biomass", "#8B5CF6"),
    ("Hydro", "#06B6D4"),
    ("Battery", "#EF4444"),
    ("Storage", "#EF4444"),
    ("Nuclear", "#F97316"),
    ("Gas", "#6B7280"),
    ("Coal", "#374151"),
];

const STATUS_COLORS: [(&str, &str); 6] = [
    ("Operational", "#10B981"),
    ("Under Construction", "#F59E0B"),
    ("Planning Permission Granted", "#3B82F6"),
    ("Application Submitted", "#8B5CF6"),
    ("Application Refused", "#EF4444"),
    ("Application Withdrawn", "#6B7280"),
];

/// Colour for a technology: the first palette key the technology contains
/// (ignoring case).
#[must_use]
pub fn technology_color(technology: &str) -> &'static str {
    if technology.is_empty() {
        return DEFAULT_COLOR;
    }
    let lower = technology.to_lowercase();
    TECHNOLOGY_COLORS
        .iter()
        .find(|(key, _)| lower.contains(&key.to_lowercase()))
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}

/// Colour for a short development status (exact match).
#[must_use]
pub fn status_color(status: &str) -> &'static str {
    STATUS_COLORS
        .iter()
        .find(|(key, _)| *key == status)
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}
