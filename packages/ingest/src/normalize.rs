//! Raw row to [`EnergyProject`] normalization.
//!
//! Maps the source's human-readable headers onto record fields through the
//! fixed [`ProjectField`] table, coerces the numeric columns, and trims
//! everything else. Normalization never fails: bad values become sentinels
//! and are reported as [`FieldIssue`]s alongside the record.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use energy_map_project_models::{EnergyProject, ProjectField};
use regex::Regex;

/// A raw row: source header to raw cell text.
pub type RawRow = BTreeMap<String, String>;

/// Leading decimal literal, used when a numeric cell carries trailing text
/// (e.g. `"12.5MW"`).
static NUMERIC_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid regex")
});

/// Why a numeric cell was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Nothing numeric could be read.
    NotANumber,
    /// Installed capacity below zero.
    Negative,
}

/// A numeric cell that could not be used and was replaced by `0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// The numeric field affected.
    pub field: ProjectField,
    /// The raw (trimmed) cell text.
    pub raw: String,
    /// Why the value was replaced.
    pub kind: IssueKind,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.kind {
            IssueKind::NotANumber => "is not a number",
            IssueKind::Negative => "is negative",
        };
        write!(
            f,
            "{} {reason}: '{}' (using 0)",
            self.field.key(),
            self.raw
        )
    }
}

/// A normalized record plus anything that had to be defaulted on the way.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    /// The normalized record.
    pub project: EnergyProject,
    /// Numeric cells that were replaced by the `0.0` sentinel.
    pub issues: Vec<FieldIssue>,
}

/// Normalizes one raw row into an [`EnergyProject`].
#[must_use]
pub fn normalize_row(row: &RawRow) -> EnergyProject {
    normalize_row_with_issues(row).project
}

/// Normalizes one raw row, also reporting numeric cells that could not be
/// parsed.
///
/// Installed capacity is never negative: a negative reading is replaced by
/// the `0.0` sentinel and reported.
///
/// Headers outside the fixed table are kept verbatim in
/// [`EnergyProject::extra`].
#[must_use]
pub fn normalize_row_with_issues(row: &RawRow) -> NormalizedRow {
    let mut project = EnergyProject::default();
    let mut issues = Vec::new();

    for (header, raw) in row {
        let value = raw.trim();

        let Some(field) = ProjectField::from_header(header) else {
            project.extra.insert(header.clone(), value.to_owned());
            continue;
        };

        if field.is_numeric() {
            let number = match parse_number(value) {
                Some(n) if field == ProjectField::InstalledCapacity && n < 0.0 => {
                    issues.push(FieldIssue {
                        field,
                        raw: value.to_owned(),
                        kind: IssueKind::Negative,
                    });
                    0.0
                }
                Some(n) => n,
                None => {
                    issues.push(FieldIssue {
                        field,
                        raw: value.to_owned(),
                        kind: IssueKind::NotANumber,
                    });
                    0.0
                }
            };
            project.set_number(field, number);
        } else {
            project.set_text(field, value.to_owned());
        }
    }

    NormalizedRow { project, issues }
}

/// Parses a numeric cell.
///
/// Empty text is the absent sentinel and yields `Some(0.0)`. Text that is
/// not wholly numeric falls back to its leading decimal literal. Returns
/// `None` when nothing numeric can be read or the result is not finite.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let parsed = text.parse::<f64>().ok().filter(|n| n.is_finite());
    parsed.or_else(|| {
        NUMERIC_PREFIX_RE
            .find(text)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(h, v)| ((*h).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn maps_known_headers_and_trims_text() {
        let project = normalize_row(&row(&[
            ("Ref ID", " 1234 "),
            ("Site Name", "  Whitelee Wind Farm"),
            ("Technology Type", "Wind Onshore "),
            ("Development Status (short)", "Operational"),
            ("Region", "Scotland"),
        ]));

        assert_eq!(project.ref_id, "1234");
        assert_eq!(project.site_name, "Whitelee Wind Farm");
        assert_eq!(project.technology_type, "Wind Onshore");
        assert!(project.is_operational());
        assert_eq!(project.region, "Scotland");
        assert!(project.operator.is_empty());
        assert!(project.extra.is_empty());
    }

    #[test]
    fn coerces_numeric_columns() {
        let normalized = normalize_row_with_issues(&row(&[
            ("Installed Capacity (MWelec)", "539"),
            ("X-coordinate", " 258015 "),
            ("Y-coordinate", "643487.5"),
        ]));

        assert!(normalized.issues.is_empty());
        assert!((normalized.project.installed_capacity - 539.0).abs() < f64::EPSILON);
        assert!((normalized.project.x_coordinate - 258_015.0).abs() < f64::EPSILON);
        assert!((normalized.project.y_coordinate - 643_487.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_numeric_cells_are_silent_sentinels() {
        let normalized = normalize_row_with_issues(&row(&[
            ("Installed Capacity (MWelec)", ""),
            ("X-coordinate", "   "),
        ]));

        assert!(normalized.issues.is_empty());
        assert!(normalized.project.installed_capacity == 0.0);
        assert!(normalized.project.x_coordinate == 0.0);
    }

    #[test]
    fn unparseable_numbers_become_zero_with_an_issue() {
        let normalized = normalize_row_with_issues(&row(&[
            ("Installed Capacity (MWelec)", "n/a"),
            ("Y-coordinate", "NaN"),
        ]));

        assert!(normalized.project.installed_capacity == 0.0);
        assert!(normalized.project.y_coordinate == 0.0);
        assert_eq!(normalized.issues.len(), 2);
        assert_eq!(normalized.issues[0].field, ProjectField::InstalledCapacity);
        assert_eq!(normalized.issues[0].raw, "n/a");
        assert_eq!(normalized.issues[0].kind, IssueKind::NotANumber);
        assert!(normalized.issues[0].to_string().contains("installedCapacity"));
    }

    #[test]
    fn numeric_prefix_is_used_when_text_trails() {
        assert_eq!(parse_number("12.5MW"), Some(12.5));
        assert_eq!(parse_number("1,200"), Some(1.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-3e2 approx"), Some(-300.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("MW 12"), None);
    }

    #[test]
    fn negative_capacity_is_replaced_by_sentinel() {
        let normalized = normalize_row_with_issues(&row(&[
            ("Installed Capacity (MWelec)", "-3e2 approx"),
            ("X-coordinate", "-5"),
        ]));

        assert!(normalized.project.installed_capacity == 0.0);
        assert!((normalized.project.x_coordinate + 5.0).abs() < f64::EPSILON);
        assert_eq!(normalized.issues.len(), 1);
        assert_eq!(normalized.issues[0].field, ProjectField::InstalledCapacity);
        assert_eq!(normalized.issues[0].kind, IssueKind::Negative);
        assert!(normalized.issues[0].to_string().contains("is negative"));
    }

    #[test]
    fn unknown_headers_pass_through() {
        let project = normalize_row(&row(&[
            ("Ref ID", "7"),
            ("Mounting Type for Solar", " Ground "),
        ]));

        assert_eq!(project.ref_id, "7");
        assert_eq!(
            project.extra.get("Mounting Type for Solar").map(String::as_str),
            Some("Ground")
        );
    }

    #[test]
    fn arbitrary_categories_are_accepted() {
        let project = normalize_row(&row(&[
            ("Technology Type", "Tidal Kite"),
            ("Development Status (short)", "Something New"),
        ]));

        assert_eq!(project.technology_type, "Tidal Kite");
        assert_eq!(project.development_status_short, "Something New");
    }
}
