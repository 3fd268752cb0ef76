#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the energy map server.
//!
//! Query parameters arrive as loose strings and are converted into the
//! typed analytics criteria here, so handlers never interpret wire values
//! themselves.

use energy_map_analytics_models::{FilterCriteria, GeoQuery};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Whether the dataset has been loaded.
    pub dataset_ready: bool,
}

/// Error body returned for failed requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}

impl ApiError {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters for the filtered summary endpoint.
///
/// A missing parameter, `""`, and `"all"` all mean no restriction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQueryParams {
    /// Exact region.
    pub region: Option<String>,
    /// Technology selection (substring or the district heating label).
    pub technology: Option<String>,
    /// Exact short development status.
    pub status: Option<String>,
}

impl From<&FilterQueryParams> for FilterCriteria {
    fn from(p: &FilterQueryParams) -> Self {
        Self::from_selections(
            p.region.as_deref().unwrap_or_default(),
            p.technology.as_deref().unwrap_or_default(),
            p.status.as_deref().unwrap_or_default(),
        )
    }
}

/// Query parameters for the markers endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerQueryParams {
    /// Exact region.
    pub region: Option<String>,
    /// Technology selection.
    pub technology: Option<String>,
    /// Exact short development status.
    pub status: Option<String>,
    /// Maximum number of markers (server default when absent).
    pub cap: Option<usize>,
}

impl MarkerQueryParams {
    /// Builds a [`GeoQuery`], falling back to `default_cap` when no cap was
    /// given.
    #[must_use]
    pub fn to_geo_query(&self, default_cap: usize) -> GeoQuery {
        let criteria = FilterCriteria::from_selections(
            self.region.as_deref().unwrap_or_default(),
            self.technology.as_deref().unwrap_or_default(),
            self.status.as_deref().unwrap_or_default(),
        );
        GeoQuery::new(criteria, self.cap.unwrap_or(default_cap))
    }
}
