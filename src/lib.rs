//! # Track Poster
//!
//! Turns a recorded GPS track into the geometry of a one-page print poster.
//!
//! This library provides:
//! - Altimetric profile reduction with ascent/descent totals
//! - Web Mercator projection and square map framing with padding
//! - Adaptive title sizing and two-line title split
//! - Page grid, footer text and basemap selection for the renderer
//!
//! Parsing GPX files, fetching map tiles and drawing the page are left to the caller;
//! this crate only computes numbers and text.
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch reduction with rayon
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use track_poster::{reduce_track, compose_viewport, BoundingBox, ProfileConfig, TrackPoint};
//!
//! let track = vec![
//!     TrackPoint::with_elevation(45.9237, 6.8694, 1035.0),
//!     TrackPoint::with_elevation(45.9250, 6.8710, 1050.0),
//!     TrackPoint::with_elevation(45.9262, 6.8731, 1071.0),
//! ];
//!
//! let profile = reduce_track(&track, &ProfileConfig::default()).unwrap();
//! println!("D+ {} m over {:.2} km", profile.ascent_m, profile.total_distance_km());
//!
//! let bbox = BoundingBox::new(0.0, 0.0, 10.0, 4.0).unwrap();
//! let viewport = compose_viewport(&bbox, 0.1).unwrap();
//! assert_eq!(viewport.side(), 12.0);
//! ```

use geo::{BoundingRect, Coord, LineString};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, PosterError, Result};

// Geographic utilities (2D/3D distance)
pub mod geo_utils;

// Profile reduction (down-sampling, ascent/descent)
pub mod profile;
#[cfg(feature = "parallel")]
pub use profile::reduce_tracks_parallel;
pub use profile::{
    cumulative_elevation_totals, elevation_totals, reduce_track, reduce_tracks, ProfileConfig,
    ReducedProfile,
};

// Web Mercator projection
pub mod projection;
pub use projection::{project_track, ProjectedTrack};

// Map framing (square viewport with padding)
pub mod frame;
pub use frame::{compose_map_frame, compose_viewport, FrameConfig, MapFrame, ViewportRect};

// Title sizing and splitting
pub mod title;
pub use title::{adaptive_font_size, split_title, TitleConfig, TitleLayout};

// Page grid
pub mod page;
pub use page::{PageConfig, PageLayout, PanelRect};

// Basemap providers
pub mod basemap;
pub use basemap::{Basemap, TileSource};

// Poster composition
pub mod poster;
pub use poster::{
    compose_poster, PosterConfig, PosterInfo, PosterLayout, PosterRequest, PosterStyle,
};

// Algorithm toolbox
pub mod algorithms;

// ============================================================================
// Core Types
// ============================================================================

/// A recorded GPS fix with optional elevation.
///
/// # Example
/// ```
/// use track_poster::TrackPoint;
/// let point = TrackPoint::with_elevation(45.8326, 6.8652, 4808.0); // Mont Blanc
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters, if recorded
    pub elevation: Option<f64>,
}

impl TrackPoint {
    /// Create a point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Elevation, or 0 when unknown.
    pub fn elevation_or_zero(&self) -> f64 {
        self.elevation.unwrap_or(0.0)
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Axis-aligned bounding box in a planar (projected) coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a bounding box, rejecting inverted or non-finite extents.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        let bbox = Self {
            xmin,
            ymin,
            xmax,
            ymax,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check that the extents are finite and not inverted.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.xmin, self.ymin, self.xmax, self.ymax]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(PosterError::InvalidBounds {
                message: "coordinates must be finite".to_string(),
            });
        }
        if self.xmax < self.xmin || self.ymax < self.ymin {
            return Err(PosterError::InvalidBounds {
                message: format!(
                    "inverted box ({}, {}, {}, {})",
                    self.xmin, self.ymin, self.xmax, self.ymax
                ),
            });
        }
        Ok(())
    }

    /// Bounding box of planar coordinates.
    pub fn from_coords(coords: &[Coord<f64>]) -> Result<Self> {
        let rect = LineString::from(coords.to_vec())
            .bounding_rect()
            .ok_or_empty_track()?;
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: (self.xmin + self.xmax) / 2.0,
            y: (self.ymin + self.ymax) / 2.0,
        }
    }

    /// Check whether this box covers another.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.xmin <= other.xmin
            && self.ymin <= other.ymin
            && self.xmax >= other.xmax
            && self.ymax >= other.ymax
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_point_validation() {
        assert!(TrackPoint::new(45.0, 6.0).is_valid());
        assert!(!TrackPoint::new(91.0, 0.0).is_valid());
        assert!(!TrackPoint::new(0.0, 181.0).is_valid());
        assert!(!TrackPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_elevation_or_zero() {
        assert_eq!(TrackPoint::new(45.0, 6.0).elevation_or_zero(), 0.0);
        assert_eq!(
            TrackPoint::with_elevation(45.0, 6.0, 812.5).elevation_or_zero(),
            812.5
        );
    }

    #[test]
    fn test_bounding_box_rejects_inverted() {
        assert!(matches!(
            BoundingBox::new(1.0, 0.0, 0.0, 1.0),
            Err(PosterError::InvalidBounds { .. })
        ));
        assert!(BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        assert!(BoundingBox::new(2.0, 2.0, 2.0, 2.0).is_ok());

        let literal = BoundingBox {
            xmin: 0.0,
            ymin: 5.0,
            xmax: 1.0,
            ymax: 4.0,
        };
        assert!(literal.validate().is_err());
    }

    #[test]
    fn test_bounding_box_from_coords() {
        let coords = vec![
            Coord { x: 3.0, y: -1.0 },
            Coord { x: -2.0, y: 4.0 },
            Coord { x: 1.0, y: 0.5 },
        ];
        let bbox = BoundingBox::from_coords(&coords).unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 3.0, 4.0).unwrap());
        assert_eq!(bbox.center(), Coord { x: 0.5, y: 1.5 });
        assert_eq!(BoundingBox::from_coords(&[]), Err(PosterError::EmptyTrack));
    }
}
