//! Poster composition.
//!
//! Assembles everything the external renderer needs for one poster page from an
//! explicit request: reduced elevation profile, projected trace and its square map
//! frame, title layout, page grid, footer text and the basemap to draw under the trace.
//!
//! ## Example
//! ```rust
//! use track_poster::{compose_poster, PosterConfig, PosterRequest, TrackPoint};
//!
//! let points: Vec<TrackPoint> = (0..50)
//!     .map(|i| TrackPoint::with_elevation(45.0 + i as f64 * 0.001, 6.0 + i as f64 * 0.0005, 1500.0 + i as f64 * 3.0))
//!     .collect();
//! let request = PosterRequest::new(points, "Col de la Vanoise");
//! let layout = compose_poster(&request, &PosterConfig::default()).unwrap();
//! assert!(layout.map.viewport.contains(&layout.trace_bounds));
//! ```

use geo::Coord;
use log::info;
use serde::{Deserialize, Serialize};

use crate::basemap::{Basemap, TileSource};
use crate::error::Result;
use crate::frame::{compose_map_frame, FrameConfig, MapFrame};
use crate::page::{PageConfig, PageLayout};
use crate::profile::{reduce_track, ProfileConfig, ReducedProfile};
use crate::projection::project_track;
use crate::title::{TitleConfig, TitleLayout};
use crate::{BoundingBox, TrackPoint};

/// Free-text fields printed in the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterInfo {
    /// Athlete name
    pub name: String,
    /// Event date, as typed by the user
    pub date: String,
    /// Finishing time, as typed by the user
    pub duration: String,
    /// Race bib number
    pub bib_number: Option<String>,
}

impl PosterInfo {
    /// Footer lines for a reduced profile.
    ///
    /// The duration line is left out when empty, the bib line when no bib is set.
    pub fn footer_lines(&self, profile: &ReducedProfile) -> Vec<String> {
        let distance_km = (profile.total_distance_km() * 100.0).round() / 100.0;

        let mut lines = vec![
            format!("{} | {}", self.name, self.date),
            format!(
                "Distance : {:?} km | D+ : {} m | D- : {} m",
                distance_km,
                profile.ascent_m,
                profile.descent_abs()
            ),
        ];
        if !self.duration.trim().is_empty() {
            lines.push(self.duration.clone());
        }
        if let Some(bib) = self.bib_number.as_deref().filter(|b| !b.trim().is_empty()) {
            lines.push(format!("Bib {}", bib.trim()));
        }
        lines
    }
}

/// Styling passed through untouched to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterStyle {
    pub trace_color: String,
    pub border_color: String,
    pub font_family: String,
}

impl Default for PosterStyle {
    fn default() -> Self {
        Self {
            trace_color: "#FF0000".to_string(),
            border_color: "#FF0000".to_string(),
            font_family: "DejaVu Sans".to_string(),
        }
    }
}

/// One poster render request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterRequest {
    pub points: Vec<TrackPoint>,
    /// Title chosen by the user (may be empty)
    pub title: String,
    /// Title used when `title` is blank, typically the track file name
    pub fallback_title: String,
    pub info: PosterInfo,
    pub style: PosterStyle,
    pub basemap: Basemap,
    /// API key for keyed basemap providers
    pub basemap_api_key: Option<String>,
}

impl PosterRequest {
    /// Request with default styling and basemap.
    pub fn new(points: Vec<TrackPoint>, title: &str) -> Self {
        Self {
            points,
            title: title.to_string(),
            fallback_title: String::new(),
            info: PosterInfo::default(),
            style: PosterStyle::default(),
            basemap: Basemap::default(),
            basemap_api_key: None,
        }
    }

    /// Title to display: the user title, or the fallback when blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.fallback_title
        } else {
            &self.title
        }
    }
}

/// All tunable constants of the poster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub profile: ProfileConfig,
    pub frame: FrameConfig,
    pub title: TitleConfig,
    pub page: PageConfig,
}

impl PosterConfig {
    /// Load a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::PosterError::InvalidConfig {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        self.frame.validate()?;
        self.title.validate()?;
        self.page.validate()
    }
}

/// Final geometry and text handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterLayout {
    pub page: PageLayout,
    pub title: TitleLayout,
    /// Projected trace, in the same coordinates as the map viewport
    pub trace: Vec<Coord<f64>>,
    pub trace_bounds: BoundingBox,
    pub map: MapFrame,
    pub profile: ReducedProfile,
    pub footer_lines: Vec<String>,
    pub style: PosterStyle,
    pub tile_source: TileSource,
}

impl PosterLayout {
    /// Serialize the layout as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| crate::PosterError::InvalidConfig {
            message: format!("layout serialization failed: {}", e),
        })
    }
}

/// Compose a poster layout from a request.
///
/// # Errors
/// Any precondition failure of the steps: invalid config, empty or invalid track,
/// degenerate track bounds, or a keyed basemap without API key.
pub fn compose_poster(request: &PosterRequest, config: &PosterConfig) -> Result<PosterLayout> {
    config.validate()?;

    let profile = reduce_track(&request.points, &config.profile)?;
    let projected = project_track(&request.points)?;
    let map = compose_map_frame(&projected, &config.frame)?;
    let tile_source = request
        .basemap
        .tile_source(request.basemap_api_key.as_deref())?;

    let title = TitleLayout::compose(request.display_title(), &config.title);
    let page = PageLayout::compute(&config.page)?;
    let footer_lines = request.info.footer_lines(&profile);

    info!(
        "[Poster] Composed '{}': {} points -> {} profile samples, {:.2} km, basemap {}",
        request.display_title(),
        request.points.len(),
        profile.sample_count(),
        profile.total_distance_km(),
        tile_source.name
    );

    Ok(PosterLayout {
        page,
        title,
        trace_bounds: projected.bounds,
        trace: projected.coords,
        map,
        profile,
        footer_lines,
        style: request.style.clone(),
        tile_source,
    })
}
