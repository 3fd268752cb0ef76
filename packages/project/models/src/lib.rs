#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Renewable energy project record and source column definitions.
//!
//! This crate defines the canonical [`EnergyProject`] record used across the
//! whole energy-map system and the fixed table mapping the REPD source
//! headers to record fields ([`ProjectField`]).
//!
//! # Sentinel values
//!
//! No field on [`EnergyProject`] is optional. An empty string means a text
//! field is absent, and `0.0` means a numeric field is absent. Presence is
//! therefore a value test (`!field.is_empty()`, `value != 0.0`).
//!
//! This conflates "unknown" with "legitimately zero" for
//! [`EnergyProject::installed_capacity`]. The source format cannot tell the
//! two apart, so neither can we.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// The development status (short form) that marks a project as operational.
pub const OPERATIONAL_STATUS: &str = "Operational";

/// A source column with a fixed mapping onto an [`EnergyProject`] field.
///
/// The string form of each variant is the exact header text used in the
/// REPD extract. Matching is case- and spacing-sensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum ProjectField {
    /// `Ref ID`
    #[strum(serialize = "Ref ID")]
    RefId,
    /// `Operator (or Applicant)`
    #[strum(serialize = "Operator (or Applicant)")]
    Operator,
    /// `Site Name`
    #[strum(serialize = "Site Name")]
    SiteName,
    /// `Technology Type`
    #[strum(serialize = "Technology Type")]
    TechnologyType,
    /// `Installed Capacity (MWelec)`
    #[strum(serialize = "Installed Capacity (MWelec)")]
    InstalledCapacity,
    /// `Development Status`
    #[strum(serialize = "Development Status")]
    DevelopmentStatus,
    /// `Development Status (short)`
    #[strum(serialize = "Development Status (short)")]
    DevelopmentStatusShort,
    /// `County`
    #[strum(serialize = "County")]
    County,
    /// `Region`
    #[strum(serialize = "Region")]
    Region,
    /// `Country`
    #[strum(serialize = "Country")]
    Country,
    /// `X-coordinate`
    #[strum(serialize = "X-coordinate")]
    XCoordinate,
    /// `Y-coordinate`
    #[strum(serialize = "Y-coordinate")]
    YCoordinate,
    /// `Planning Permission Granted`
    #[strum(serialize = "Planning Permission Granted")]
    PlanningPermissionGranted,
    /// `Operational`
    #[strum(serialize = "Operational")]
    Operational,
    /// `Under Construction`
    #[strum(serialize = "Under Construction")]
    UnderConstruction,
}

impl ProjectField {
    /// Every mapped column, in source order.
    pub const ALL: [Self; 15] = [
        Self::RefId,
        Self::Operator,
        Self::SiteName,
        Self::TechnologyType,
        Self::InstalledCapacity,
        Self::DevelopmentStatus,
        Self::DevelopmentStatusShort,
        Self::County,
        Self::Region,
        Self::Country,
        Self::XCoordinate,
        Self::YCoordinate,
        Self::PlanningPermissionGranted,
        Self::Operational,
        Self::UnderConstruction,
    ];

    /// Looks up the field for an exact source header.
    ///
    /// Returns `None` for headers outside the fixed table; callers keep
    /// those columns as pass-through extras.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        header.parse().ok()
    }

    /// The exact source header text.
    #[must_use]
    pub fn header(self) -> &'static str {
        self.into()
    }

    /// The canonical camelCase field name used in serialized output.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::RefId => "refId",
            Self::Operator => "operator",
            Self::SiteName => "siteName",
            Self::TechnologyType => "technologyType",
            Self::InstalledCapacity => "installedCapacity",
            Self::DevelopmentStatus => "developmentStatus",
            Self::DevelopmentStatusShort => "developmentStatusShort",
            Self::County => "county",
            Self::Region => "region",
            Self::Country => "country",
            Self::XCoordinate => "xCoordinate",
            Self::YCoordinate => "yCoordinate",
            Self::PlanningPermissionGranted => "planningPermissionGranted",
            Self::Operational => "operational",
            Self::UnderConstruction => "underConstruction",
        }
    }

    /// Whether the column is coerced to a number rather than kept as text.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::InstalledCapacity | Self::XCoordinate | Self::YCoordinate
        )
    }
}

/// One renewable energy project (one row of the REPD extract).
///
/// See the crate docs for the sentinel conventions every field follows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyProject {
    /// Opaque source identifier. Not guaranteed unique.
    pub ref_id: String,
    /// Operator or applicant.
    pub operator: String,
    /// Site name.
    pub site_name: String,
    /// Technology type (e.g. `Solar Photovoltaics`, `Wind Onshore`).
    pub technology_type: String,
    /// Installed capacity in megawatts. `0.0` when unknown.
    pub installed_capacity: f64,
    /// Long-form development status.
    pub development_status: String,
    /// Short-form development status (e.g. `Operational`).
    pub development_status_short: String,
    /// County.
    pub county: String,
    /// Region.
    pub region: String,
    /// Country.
    pub country: String,
    /// National grid easting. `0.0` when absent.
    pub x_coordinate: f64,
    /// National grid northing. `0.0` when absent.
    pub y_coordinate: f64,
    /// Planning permission date, as written in the source.
    pub planning_permission_granted: String,
    /// Operational date, as written in the source.
    pub operational: String,
    /// Under-construction date, as written in the source.
    pub under_construction: String,
    /// Columns outside the fixed header table, keyed by their original
    /// header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl EnergyProject {
    /// Whether the short development status is exactly
    /// [`OPERATIONAL_STATUS`].
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.development_status_short == OPERATIONAL_STATUS
    }

    /// Whether both grid coordinates are present (non-sentinel and finite).
    ///
    /// This does not check the coordinates are inside the grid envelope.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.x_coordinate != 0.0
            && self.y_coordinate != 0.0
            && self.x_coordinate.is_finite()
            && self.y_coordinate.is_finite()
    }

    /// Stores a text value for a mapped field.
    ///
    /// Numeric fields are ignored here; use [`Self::set_number`].
    pub fn set_text(&mut self, field: ProjectField, value: String) {
        let slot = match field {
            ProjectField::RefId => &mut self.ref_id,
            ProjectField::Operator => &mut self.operator,
            ProjectField::SiteName => &mut self.site_name,
            ProjectField::TechnologyType => &mut self.technology_type,
            ProjectField::DevelopmentStatus => &mut self.development_status,
            ProjectField::DevelopmentStatusShort => &mut self.development_status_short,
            ProjectField::County => &mut self.county,
            ProjectField::Region => &mut self.region,
            ProjectField::Country => &mut self.country,
            ProjectField::PlanningPermissionGranted => &mut self.planning_permission_granted,
            ProjectField::Operational => &mut self.operational,
            ProjectField::UnderConstruction => &mut self.under_construction,
            ProjectField::InstalledCapacity
            | ProjectField::XCoordinate
            | ProjectField::YCoordinate => return,
        };
        *slot = value;
    }

    /// Stores a numeric value for a mapped field.
    ///
    /// Text fields are ignored here; use [`Self::set_text`].
    pub const fn set_number(&mut self, field: ProjectField, value: f64) {
        match field {
            ProjectField::InstalledCapacity => self.installed_capacity = value,
            ProjectField::XCoordinate => self.x_coordinate = value,
            ProjectField::YCoordinate => self.y_coordinate = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_exact() {
        assert_eq!(
            ProjectField::from_header("Installed Capacity (MWelec)"),
            Some(ProjectField::InstalledCapacity)
        );
        assert_eq!(ProjectField::from_header("installed capacity (mwelec)"), None);
        assert_eq!(ProjectField::from_header("Ref  ID"), None);
        assert_eq!(ProjectField::from_header("Mounting Type"), None);
    }

    #[test]
    fn every_field_round_trips_through_its_header() {
        for field in ProjectField::ALL {
            assert_eq!(ProjectField::from_header(field.header()), Some(field));
        }
    }

    #[test]
    fn only_capacity_and_coordinates_are_numeric() {
        let numeric: Vec<ProjectField> = ProjectField::ALL
            .into_iter()
            .filter(|f| f.is_numeric())
            .collect();
        assert_eq!(
            numeric,
            vec![
                ProjectField::InstalledCapacity,
                ProjectField::XCoordinate,
                ProjectField::YCoordinate,
            ]
        );
    }

    #[test]
    fn default_project_uses_sentinels() {
        let project = EnergyProject::default();
        assert!(project.ref_id.is_empty());
        assert!(project.installed_capacity == 0.0);
        assert!(!project.has_coordinates());
        assert!(!project.is_operational());
    }

    #[test]
    fn setters_ignore_mismatched_kinds() {
        let mut project = EnergyProject::default();
        project.set_text(ProjectField::InstalledCapacity, "12".to_string());
        project.set_number(ProjectField::Region, 12.0);
        assert!(project.installed_capacity == 0.0);
        assert!(project.region.is_empty());

        project.set_text(ProjectField::Region, "Scotland".to_string());
        project.set_number(ProjectField::XCoordinate, 250_000.0);
        assert_eq!(project.region, "Scotland");
        assert!((project.x_coordinate - 250_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_extras() {
        let project = EnergyProject {
            ref_id: "1".to_string(),
            development_status_short: "Operational".to_string(),
            ..EnergyProject::default()
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["refId"], "1");
        assert_eq!(json["developmentStatusShort"], "Operational");
        assert!(json.get("extra").is_none());
    }
}
