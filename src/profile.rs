//! Altimetric profile reduction.
//!
//! Raw GPS tracks often carry thousands of high-frequency points. This module reduces
//! them to a spatially near-uniform distance/elevation series suitable for plotting,
//! and derives ascent (D+) and descent (D-) totals from that reduced series.
//!
//! ## Example
//! ```rust
//! use track_poster::{TrackPoint, ProfileConfig};
//! use track_poster::profile::reduce_track;
//!
//! let points: Vec<TrackPoint> = (0..100)
//!     .map(|i| TrackPoint::with_elevation(45.0 + i as f64 * 0.0001, 6.0, 1000.0 + i as f64))
//!     .collect();
//! let profile = reduce_track(&points, &ProfileConfig::default()).unwrap();
//! assert_eq!(profile.distances_km[0], 0.0);
//! assert!(profile.ascent_m > 0.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{PosterError, Result};
use crate::geo_utils::distance_3d;
use crate::TrackPoint;

/// Default minimum 3D displacement between retained samples, in meters.
pub const DEFAULT_RETENTION_THRESHOLD_M: f64 = 30.0;

/// Configuration for profile reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Accumulated displacement (meters) required before the next sample is retained.
    /// Default: 30.0
    pub retention_threshold_m: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            retention_threshold_m: DEFAULT_RETENTION_THRESHOLD_M,
        }
    }
}

impl ProfileConfig {
    /// Create config with a custom retention threshold.
    pub fn with_threshold(retention_threshold_m: f64) -> Self {
        Self {
            retention_threshold_m,
        }
    }

    /// Check that the threshold is a finite, non-negative distance.
    pub fn validate(&self) -> Result<()> {
        if !self.retention_threshold_m.is_finite() || self.retention_threshold_m < 0.0 {
            return Err(PosterError::InvalidConfig {
                message: format!(
                    "retention threshold must be a non-negative distance, got {}",
                    self.retention_threshold_m
                ),
            });
        }
        Ok(())
    }
}

/// Down-sampled distance/elevation series with ascent and descent totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedProfile {
    /// Cumulative distance of each retained sample, in kilometers (non-decreasing)
    pub distances_km: Vec<f64>,
    /// Elevation of each retained sample, in meters
    pub elevations_m: Vec<f64>,
    /// Total ascent over the retained samples, rounded to the meter
    pub ascent_m: f64,
    /// Total descent over the retained samples, rounded to the meter (zero or negative)
    pub descent_m: f64,
}

impl ReducedProfile {
    /// Number of retained samples.
    pub fn sample_count(&self) -> usize {
        self.distances_km.len()
    }

    /// Cumulative distance of the last retained sample, in kilometers.
    ///
    /// Distance travelled after the last retained sample is not included.
    pub fn total_distance_km(&self) -> f64 {
        self.distances_km.last().copied().unwrap_or(0.0)
    }

    /// Descent as a positive magnitude.
    pub fn descent_abs(&self) -> f64 {
        self.descent_m.abs()
    }

    /// Midpoint distance between each pair of consecutive samples (length `n - 1`).
    pub fn midpoint_distances_km(&self) -> Vec<f64> {
        self.distances_km
            .windows(2)
            .map(|w| (w[0] + w[1]) / 2.0)
            .collect()
    }
}

/// Reduce a track to a down-sampled profile.
///
/// The first point is always retained at distance 0. Every following point adds its 3D
/// distance from the previous raw point to the running total; once the distance since
/// the last retained sample reaches the threshold, the point is retained and the counter
/// resets. Skipped points still count towards the total distance.
///
/// Unknown elevations are recorded as 0.
///
/// # Errors
/// - [`PosterError::EmptyTrack`] when `points` is empty
/// - [`PosterError::InvalidConfig`] when the threshold is negative or not finite
pub fn reduce_track(points: &[TrackPoint], config: &ProfileConfig) -> Result<ReducedProfile> {
    config.validate()?;
    let first = points.first().ok_or(PosterError::EmptyTrack)?;

    let threshold = config.retention_threshold_m;
    let mut distances_km = vec![0.0];
    let mut elevations_m = vec![first.elevation_or_zero()];

    let mut total_distance = 0.0;
    let mut since_retained = 0.0;

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let d = distance_3d(curr, prev);
        total_distance += d;
        since_retained += d;

        if since_retained >= threshold {
            distances_km.push(total_distance / 1000.0);
            elevations_m.push(curr.elevation_or_zero());
            since_retained = 0.0;
        }
    }

    let (ascent_m, descent_m) = elevation_totals(&elevations_m);

    debug!(
        "[Profile] Reduced {} points to {} samples ({:.2} km, D+ {} m, D- {} m)",
        points.len(),
        distances_km.len(),
        total_distance / 1000.0,
        ascent_m,
        descent_m
    );

    Ok(ReducedProfile {
        distances_km,
        elevations_m,
        ascent_m,
        descent_m,
    })
}

/// Ascent and descent over an elevation series, rounded to the nearest meter.
///
/// Positive steps count as ascent; all other steps count as descent, so descent is zero
/// or negative. Halfway values round to the even meter.
pub fn elevation_totals(elevations: &[f64]) -> (f64, f64) {
    let mut ascent = 0.0_f64;
    let mut descent = 0.0_f64;

    for w in elevations.windows(2) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            ascent += delta;
        } else {
            descent += delta;
        }
    }

    (ascent.round_ties_even(), descent.round_ties_even())
}

/// Running ascent and descent series, unrounded.
///
/// Both series have the same length as the input and start at 0.
pub fn cumulative_elevation_totals(elevations: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if elevations.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut ascent = Vec::with_capacity(elevations.len());
    let mut descent = Vec::with_capacity(elevations.len());
    ascent.push(0.0);
    descent.push(0.0);

    for w in elevations.windows(2) {
        let delta = w[1] - w[0];
        let (last_up, last_down) = (ascent[ascent.len() - 1], descent[descent.len() - 1]);
        if delta > 0.0 {
            ascent.push(last_up + delta);
            descent.push(last_down);
        } else {
            ascent.push(last_up);
            descent.push(last_down + delta);
        }
    }

    (ascent, descent)
}

/// Reduce several independent tracks.
pub fn reduce_tracks(
    tracks: &[Vec<TrackPoint>],
    config: &ProfileConfig,
) -> Vec<Result<ReducedProfile>> {
    tracks.iter().map(|t| reduce_track(t, config)).collect()
}

/// Parallel version of [`reduce_tracks`].
#[cfg(feature = "parallel")]
pub fn reduce_tracks_parallel(
    tracks: &[Vec<TrackPoint>],
    config: &ProfileConfig,
) -> Vec<Result<ReducedProfile>> {
    tracks.par_iter().map(|t| reduce_track(t, config)).collect()
}
