//! # Algorithm Toolbox
//!
//! Direct access to the numerical building blocks of the poster, for callers that
//! want a single step without composing a whole poster.
//!
//! ## Profile
//!
//! - **Profile Reduction**: distance-threshold down-sampling of a track
//! - **Elevation Totals**: ascent/descent over an elevation series
//!
//! ## Geometry
//!
//! - **3D Distance**: flat/haversine horizontal distance plus elevation
//! - **Web Mercator**: projection of GPS points to planar meters
//! - **Viewport**: square, padded framing of a bounding box
//! - **Page Rows**: proportional row split with gaps
//!
//! # Example
//!
//! ```rust
//! use track_poster::algorithms::{distance_3d, TrackPoint};
//!
//! let a = TrackPoint::with_elevation(45.0, 6.0, 1000.0);
//! let b = TrackPoint::with_elevation(45.001, 6.0, 1010.0);
//! println!("{:.1} m", distance_3d(&b, &a));
//! ```

// =============================================================================
// Core Types (re-exported from lib)
// =============================================================================

pub use crate::{BoundingBox, ReducedProfile, TrackPoint, ViewportRect};

// =============================================================================
// Geographic Utilities
// =============================================================================

pub use crate::geo_utils::{distance_2d, distance_3d, haversine_distance, track_length_3d};

pub use crate::projection::{lat_to_y, lon_to_x, project_point};

// =============================================================================
// Profile Algorithms
// =============================================================================

/// Greedy single-pass down-sampling with a distance threshold.
pub use crate::profile::reduce_track;

/// Ascent/descent totals, rounded to the meter.
pub use crate::profile::elevation_totals;

/// Running ascent/descent series.
pub use crate::profile::cumulative_elevation_totals;

// =============================================================================
// Layout Algorithms
// =============================================================================

/// Square and pad a bounding box.
pub use crate::frame::compose_viewport;

/// Title font size shrinking with length.
pub use crate::title::adaptive_font_size;

/// Two-line title split.
pub use crate::title::split_title;

/// Proportional row split and square fitting of page panels.
pub use crate::page::{fit_square, split_rows};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbox_reexports_agree() {
        let track = vec![
            TrackPoint::with_elevation(45.0, 6.0, 100.0),
            TrackPoint::with_elevation(45.001, 6.0, 120.0),
        ];
        let profile = reduce_track(&track, &crate::ProfileConfig::default()).unwrap();
        let expected_km = track_length_3d(&track) / 1000.0;
        assert!((profile.total_distance_km() - expected_km).abs() < 1e-12);
        assert_eq!(elevation_totals(&profile.elevations_m), (20.0, 0.0));
    }
}
