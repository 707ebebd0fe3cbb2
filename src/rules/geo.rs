//! Great-circle distance between two coordinates.
//!
//! Uses the haversine formula on a spherical earth. Accurate to well
//! under a meter at geofence scales, which is all the check-in radius
//! comparison needs.

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters for the spherical approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Computes the great-circle surface distance between two points, in
/// meters.
///
/// Symmetric in its arguments, and zero (within floating-point epsilon)
/// when both points coincide.
///
/// # Example
///
/// ```
/// use attendance_engine::rules::{Coordinates, distance_meters};
///
/// let office = Coordinates::new(-6.2, 106.816666);
/// assert!(distance_meters(office, office) < 1e-6);
///
/// // one thousandth of a degree of latitude is about 111 meters
/// let nearby = Coordinates::new(-6.201, 106.816666);
/// let d = distance_meters(office, nearby);
/// assert!((d - 111.2).abs() < 0.5);
/// ```
pub fn distance_meters(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
