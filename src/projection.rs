//! Web Mercator projection of GPS tracks.
//!
//! Basemap tile services render in spherical Web Mercator (EPSG:3857), so the map trace,
//! its bounding box and the framing viewport are all expressed in projected meters.

use geo::Coord;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{PosterError, Result};
use crate::{BoundingBox, TrackPoint};

/// Sphere radius of the Web Mercator projection, in meters.
pub const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator square, in degrees.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// A track projected to Web Mercator, with its planar bounds and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedTrack {
    /// Projected coordinates in track order (x = easting, y = northing)
    pub coords: Vec<Coord<f64>>,
    /// Planar bounding box of `coords`
    pub bounds: BoundingBox,
    /// First projected point
    pub start: Coord<f64>,
    /// Last projected point
    pub end: Coord<f64>,
}

/// Project longitude (degrees) to Web Mercator x (meters).
#[inline]
pub fn lon_to_x(lon: f64) -> f64 {
    MERCATOR_RADIUS_M * lon.to_radians()
}

/// Project latitude (degrees) to Web Mercator y (meters).
///
/// Latitudes beyond the Mercator limit are clamped.
#[inline]
pub fn lat_to_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    MERCATOR_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln()
}

/// Project a single track point.
pub fn project_point(point: &TrackPoint) -> Coord<f64> {
    Coord {
        x: lon_to_x(point.longitude),
        y: lat_to_y(point.latitude),
    }
}

/// Project a whole track and compute its planar bounds.
///
/// # Errors
/// - [`PosterError::EmptyTrack`] when `points` is empty
/// - [`PosterError::InvalidCoordinates`] when a point is out of range or not finite
pub fn project_track(points: &[TrackPoint]) -> Result<ProjectedTrack> {
    if points.is_empty() {
        return Err(PosterError::EmptyTrack);
    }

    if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_valid()) {
        return Err(PosterError::InvalidCoordinates {
            index,
            message: format!("({}, {})", p.latitude, p.longitude),
        });
    }

    let coords: Vec<Coord<f64>> = points.iter().map(project_point).collect();
    let bounds = BoundingBox::from_coords(&coords)?;

    Ok(ProjectedTrack {
        start: coords[0],
        end: coords[coords.len() - 1],
        coords,
        bounds,
    })
}
