#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! National grid to latitude/longitude conversion.
//!
//! Converts British National Grid easting/northing pairs into approximate
//! WGS84 latitude/longitude for map display. The conversion is a locally
//! linear approximation, not a full geodetic projection: points drift the
//! further they are from the calibration origin, which is accurate enough
//! to place a project marker on a country-scale map.
//!
//! Every conversion passes two independent checks: the input must lie in
//! the grid envelope, and the output must lie in the geographic bounding
//! box of Great Britain. Anything else yields `None`.

use geo::{Coord, Intersects, Rect};
use serde::Serialize;

/// Largest easting accepted, in metres.
pub const MAX_EASTING: f64 = 800_000.0;

/// Largest northing accepted, in metres.
pub const MAX_NORTHING: f64 = 1_400_000.0;

/// Approximate metres per degree of latitude.
pub const METRES_PER_DEGREE: f64 = 111_000.0;

/// Latitude of the grid origin used by the approximation.
pub const ORIGIN_LAT: f64 = 49.0;

/// Longitude of the grid origin used by the approximation.
pub const ORIGIN_LNG: f64 = -8.0;

/// Northern edge of the accepted geographic box.
pub const MAX_LAT: f64 = 61.0;

/// Eastern edge of the accepted geographic box.
pub const MAX_LNG: f64 = 2.0;

/// A validated latitude/longitude pair.
///
/// Only [`to_geo_point`] creates these, so every `GeoPoint` lies inside the
/// covered bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

/// The valid grid envelope, inclusive on every edge.
fn grid_envelope() -> Rect<f64> {
    Rect::new(
        Coord { x: 0.0, y: 0.0 },
        Coord {
            x: MAX_EASTING,
            y: MAX_NORTHING,
        },
    )
}

/// The geographic box a converted point must fall in, inclusive on every
/// edge. x is longitude, y is latitude.
fn geographic_bounds() -> Rect<f64> {
    Rect::new(
        Coord {
            x: ORIGIN_LNG,
            y: ORIGIN_LAT,
        },
        Coord {
            x: MAX_LNG,
            y: MAX_LAT,
        },
    )
}

/// Converts a national grid easting/northing to a [`GeoPoint`].
///
/// Returns `None` when either value is non-finite or the `0.0` "absent"
/// sentinel, when the pair is outside the grid envelope, or when the
/// converted point is outside the geographic bounds.
#[must_use]
pub fn to_geo_point(easting: f64, northing: f64) -> Option<GeoPoint> {
    if !easting.is_finite() || !northing.is_finite() || easting == 0.0 || northing == 0.0 {
        return None;
    }

    if !grid_envelope().intersects(&Coord {
        x: easting,
        y: northing,
    }) {
        log::trace!("Grid reference ({easting}, {northing}) outside envelope");
        return None;
    }

    let lat = ORIGIN_LAT + northing / METRES_PER_DEGREE;
    let lng = ORIGIN_LNG + easting / (METRES_PER_DEGREE * lat.to_radians().cos());

    // Second, independent check on the output.
    if !lat.is_finite()
        || !lng.is_finite()
        || !geographic_bounds().intersects(&Coord { x: lng, y: lat })
    {
        log::trace!("Grid reference ({easting}, {northing}) converts outside bounds: {lat}, {lng}");
        return None;
    }

    Some(GeoPoint { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sentinel_coordinates() {
        assert!(to_geo_point(0.0, 400_000.0).is_none());
        assert!(to_geo_point(400_000.0, 0.0).is_none());
        assert!(to_geo_point(0.0, 0.0).is_none());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(to_geo_point(f64::NAN, 400_000.0).is_none());
        assert!(to_geo_point(400_000.0, f64::INFINITY).is_none());
    }

    #[test]
    fn converts_mid_grid_point() {
        let point = to_geo_point(400_000.0, 400_000.0).unwrap();
        assert!((49.0..=61.0).contains(&point.lat()));
        assert!((-8.0..=2.0).contains(&point.lng()));
        assert!((point.lat() - 52.603_603).abs() < 1e-5);
    }

    #[test]
    fn rejects_outside_grid_envelope() {
        assert!(to_geo_point(-10.0, 400_000.0).is_none());
        assert!(to_geo_point(800_001.0, 400_000.0).is_none());
        assert!(to_geo_point(400_000.0, 1_400_001.0).is_none());
    }

    #[test]
    fn rejects_points_converting_outside_bounds() {
        // Inside the grid envelope, but north of 61 degrees.
        assert!(to_geo_point(100_000.0, 1_350_000.0).is_none());
        // Far east at high latitude pushes longitude past 2 degrees.
        assert!(to_geo_point(790_000.0, 1_200_000.0).is_none());
    }

    #[test]
    fn accepts_small_positive_coordinates() {
        let point = to_geo_point(1.0, 1.0).unwrap();
        assert!(point.lat() > ORIGIN_LAT);
        assert!(point.lng() > ORIGIN_LNG);
    }

    #[test]
    fn serializes_as_lat_lng() {
        let point = to_geo_point(400_000.0, 400_000.0).unwrap();
        let json = serde_json::to_value(point).unwrap();
        assert!(json["lat"].is_f64());
        assert!(json["lng"].is_f64());
    }
}
