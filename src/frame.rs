//! Map framing geometry.
//!
//! The map panel of the poster is square. A track's planar bounding box is widened
//! along its shorter side until it is square, then padded on all four sides by a
//! fraction of the original longer side.

use geo::Coord;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::projection::ProjectedTrack;
use crate::BoundingBox;

/// Largest accepted padding factor.
pub const MAX_PADDING_FACTOR: f64 = 0.5;

/// Configuration for map framing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Padding added on each side, as a fraction of the longer bounding-box side.
    /// Must lie in [0, 0.5]. Default: 0.2
    pub padding_factor: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            padding_factor: 0.2,
        }
    }
}

impl FrameConfig {
    pub fn validate(&self) -> Result<()> {
        check_padding(self.padding_factor)
    }
}

/// Square, padded rectangle framing the map render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl ViewportRect {
    /// Side length of the square.
    pub fn side(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Check whether the viewport covers a bounding box.
    pub fn contains(&self, bbox: &BoundingBox) -> bool {
        self.xmin <= bbox.xmin
            && self.ymin <= bbox.ymin
            && self.xmax >= bbox.xmax
            && self.ymax >= bbox.ymax
    }
}

/// Viewport plus the track endpoints drawn as start/finish markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub viewport: ViewportRect,
    pub start: Coord<f64>,
    pub end: Coord<f64>,
}

fn check_padding(padding_factor: f64) -> Result<()> {
    // NaN fails the range check
    if !(0.0..=MAX_PADDING_FACTOR).contains(&padding_factor) {
        return Err(PosterError::InvalidPadding { padding_factor });
    }
    Ok(())
}

/// Force a bounding box square and pad it.
///
/// The squared box is centered on the original box and has side `max(width, height)`.
/// Padding is `padding_factor * max(width, height)` on every side.
///
/// # Errors
/// - [`PosterError::InvalidPadding`] when `padding_factor` is outside [0, 0.5]
/// - [`PosterError::InvalidBounds`] when the box is inverted or not finite
/// - [`PosterError::DegenerateTrack`] when the box has zero width and zero height
///
/// # Example
/// ```
/// use track_poster::BoundingBox;
/// use track_poster::frame::compose_viewport;
///
/// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 4.0).unwrap();
/// let viewport = compose_viewport(&bbox, 0.1).unwrap();
/// assert_eq!(
///     (viewport.xmin, viewport.ymin, viewport.xmax, viewport.ymax),
///     (-1.0, -4.0, 11.0, 8.0)
/// );
/// ```
pub fn compose_viewport(bbox: &BoundingBox, padding_factor: f64) -> Result<ViewportRect> {
    check_padding(padding_factor)?;
    bbox.validate()?;

    let width = bbox.width();
    let height = bbox.height();
    if width == 0.0 && height == 0.0 {
        return Err(PosterError::DegenerateTrack { width, height });
    }

    let (mut xmin, mut ymin, mut xmax, mut ymax) = (bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax);

    if width > height {
        let delta = (width - height) / 2.0;
        ymin -= delta;
        ymax += delta;
    } else {
        let delta = (height - width) / 2.0;
        xmin -= delta;
        xmax += delta;
    }

    let padding = padding_factor * width.max(height);

    Ok(ViewportRect {
        xmin: xmin - padding,
        ymin: ymin - padding,
        xmax: xmax + padding,
        ymax: ymax + padding,
    })
}

/// Frame a projected track for the map panel.
pub fn compose_map_frame(track: &ProjectedTrack, config: &FrameConfig) -> Result<MapFrame> {
    let viewport = compose_viewport(&track.bounds, config.padding_factor)?;

    debug!(
        "[Frame] Viewport side {:.0} m around {}x{} m track bounds",
        viewport.side(),
        track.bounds.width().round(),
        track.bounds.height().round()
    );

    Ok(MapFrame {
        viewport,
        start: track.start,
        end: track.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_track;
    use crate::TrackPoint;

    fn rect(v: &ViewportRect) -> (f64, f64, f64, f64) {
        (v.xmin, v.ymin, v.xmax, v.ymax)
    }

    #[test]
    fn test_wide_box_without_padding() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 4.0).unwrap();
        let v = compose_viewport(&bbox, 0.0).unwrap();
        assert_eq!(rect(&v), (0.0, -3.0, 10.0, 7.0));
        assert_eq!(v.side(), 10.0);
    }

    #[test]
    fn test_wide_box_with_padding() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 4.0).unwrap();
        let v = compose_viewport(&bbox, 0.1).unwrap();
        assert_eq!(rect(&v), (-1.0, -4.0, 11.0, 8.0));
    }

    #[test]
    fn test_tall_box() {
        let bbox = BoundingBox::new(2.0, 0.0, 4.0, 8.0).unwrap();
        let v = compose_viewport(&bbox, 0.25).unwrap();
        // Squared to (-1, 0, 7, 8), then 2 on every side
        assert_eq!(rect(&v), (-3.0, -2.0, 9.0, 10.0));
        assert_eq!(v.width(), v.height());
    }

    #[test]
    fn test_line_box_is_accepted() {
        // Zero height alone is not degenerate
        let bbox = BoundingBox::new(0.0, 5.0, 6.0, 5.0).unwrap();
        let v = compose_viewport(&bbox, 0.0).unwrap();
        assert_eq!(rect(&v), (0.0, 2.0, 6.0, 8.0));
    }

    #[test]
    fn test_square_and_contains_for_many_boxes() {
        for i in 1..40 {
            let w = i as f64 * 37.5;
            let h = (40 - i) as f64 * 12.25;
            let bbox = BoundingBox::new(-w / 3.0, 1000.0, 2.0 * w / 3.0, 1000.0 + h).unwrap();
            for padding in [0.0, 0.05, 0.2, 0.5] {
                let v = compose_viewport(&bbox, padding).unwrap();
                assert!((v.width() - v.height()).abs() < 1e-9);
                assert!(v.contains(&bbox));
                let expected_side = w.max(h) * (1.0 + 2.0 * padding);
                assert!((v.side() - expected_side).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_degenerate_box_fails() {
        let bbox = BoundingBox::new(3.0, 3.0, 3.0, 3.0).unwrap();
        assert_eq!(
            compose_viewport(&bbox, 0.2),
            Err(PosterError::DegenerateTrack {
                width: 0.0,
                height: 0.0
            })
        );
    }

    #[test]
    fn test_padding_out_of_range_fails() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        for bad in [-0.01, 0.51, f64::NAN] {
            assert!(matches!(
                compose_viewport(&bbox, bad),
                Err(PosterError::InvalidPadding { .. })
            ));
        }
        assert!(compose_viewport(&bbox, 0.5).is_ok());
    }

    #[test]
    fn test_invalid_box_is_rejected() {
        // Deserialized boxes bypass the constructor
        let inverted: BoundingBox =
            serde_json::from_str(r#"{"xmin":10,"ymin":0,"xmax":0,"ymax":4}"#).unwrap();
        assert!(matches!(
            compose_viewport(&inverted, 0.1),
            Err(PosterError::InvalidBounds { .. })
        ));

        let not_finite = BoundingBox {
            xmin: f64::NAN,
            ymin: 0.0,
            xmax: 10.0,
            ymax: 4.0,
        };
        assert!(matches!(
            compose_viewport(&not_finite, 0.1),
            Err(PosterError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_repeated_point_track_is_degenerate() {
        let points = vec![TrackPoint::new(45.0, 6.0); 4];
        let track = project_track(&points).unwrap();
        assert!(matches!(
            compose_map_frame(&track, &FrameConfig::default()),
            Err(PosterError::DegenerateTrack { .. })
        ));
    }

    #[test]
    fn test_map_frame_keeps_endpoints() {
        let points = vec![
            TrackPoint::new(45.0, 6.0),
            TrackPoint::new(45.02, 6.05),
            TrackPoint::new(45.01, 6.01),
        ];
        let track = project_track(&points).unwrap();
        let frame = compose_map_frame(&track, &FrameConfig::default()).unwrap();
        assert_eq!(frame.start, track.start);
        assert_eq!(frame.end, track.end);
        assert!(frame.viewport.contains(&track.bounds));
    }
}
