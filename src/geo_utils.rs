//! Geographic distance utilities.
//!
//! Horizontal distance follows the convention of common GPX tooling: a locally flat
//! approximation for short hops and a haversine great-circle distance once either
//! coordinate delta exceeds 0.2 degrees. Elevation difference is folded in by Pythagoras.

use crate::TrackPoint;

/// Earth radius used for haversine distance (WGS84 equatorial radius, meters).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Length of one degree of latitude in the flat approximation (meters).
pub const ONE_DEGREE_M: f64 = 1000.0 * 10000.8 / 90.0;

/// Coordinate delta (degrees) above which the flat approximation is abandoned.
const FLAT_APPROXIMATION_LIMIT_DEG: f64 = 0.2;

/// Great-circle distance between two points in meters.
///
/// # Example
/// ```
/// use track_poster::TrackPoint;
/// use track_poster::geo_utils::haversine_distance;
///
/// let london = TrackPoint::new(51.5074, -0.1278);
/// let paris = TrackPoint::new(48.8566, 2.3522);
/// let d = haversine_distance(&london, &paris);
/// assert!(d > 340_000.0 && d < 346_000.0);
/// ```
pub fn haversine_distance(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let d_lat = (p1.latitude - p2.latitude).to_radians();
    let d_lon = (p1.longitude - p2.longitude).to_radians();
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Horizontal distance between two points in meters.
///
/// The cosine correction for longitude is taken at `p1`'s latitude.
pub fn distance_2d(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let d_lat = p1.latitude - p2.latitude;
    let d_lon = p1.longitude - p2.longitude;

    if d_lat.abs() > FLAT_APPROXIMATION_LIMIT_DEG || d_lon.abs() > FLAT_APPROXIMATION_LIMIT_DEG {
        return haversine_distance(p1, p2);
    }

    let coef = p1.latitude.to_radians().cos();
    let x = d_lat;
    let y = d_lon * coef;
    (x * x + y * y).sqrt() * ONE_DEGREE_M
}

/// Distance between two points in meters, including elevation difference.
///
/// Falls back to the horizontal distance when either elevation is unknown.
pub fn distance_3d(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let horizontal = distance_2d(p1, p2);
    match (p1.elevation, p2.elevation) {
        (Some(e1), Some(e2)) if e1 != e2 => {
            let dz = e1 - e2;
            (horizontal * horizontal + dz * dz).sqrt()
        }
        _ => horizontal,
    }
}

/// Total 3D length of a track in meters.
pub fn track_length_3d(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| distance_3d(&w[1], &w[0]))
        .sum()
}

/// Convert meters along a meridian to degrees of latitude (flat approximation).
pub fn meters_to_lat_degrees(meters: f64) -> f64 {
    meters / ONE_DEGREE_M
}
