//! Named basemap tile providers.
//!
//! The renderer fetches and draws map tiles itself; this crate only names the provider
//! and hands over its URL template, attribution and zoom limit.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

/// Basemap tile providers offered for the poster map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basemap {
    #[default]
    #[serde(rename = "OpenStreetMap.Mapnik")]
    OpenStreetMapMapnik,
    #[serde(rename = "CartoDB.Positron")]
    CartoDbPositron,
    #[serde(rename = "OpenTopoMap")]
    OpenTopoMap,
    #[serde(rename = "Thunderforest.Outdoors")]
    ThunderforestOutdoors,
}

/// Provider details handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSource {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Basemap {
    pub const ALL: [Basemap; 4] = [
        Basemap::OpenStreetMapMapnik,
        Basemap::CartoDbPositron,
        Basemap::OpenTopoMap,
        Basemap::ThunderforestOutdoors,
    ];

    /// Provider name as used by tile provider catalogues.
    pub fn name(&self) -> &'static str {
        match self {
            Basemap::OpenStreetMapMapnik => "OpenStreetMap.Mapnik",
            Basemap::CartoDbPositron => "CartoDB.Positron",
            Basemap::OpenTopoMap => "OpenTopoMap",
            Basemap::ThunderforestOutdoors => "Thunderforest.Outdoors",
        }
    }

    /// Look up a basemap by provider name.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name() == normalized)
            .ok_or_else(|| PosterError::UnknownBasemap {
                name: name.to_string(),
            })
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Basemap::ThunderforestOutdoors)
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Basemap::OpenStreetMapMapnik => "(C) OpenStreetMap contributors",
            Basemap::CartoDbPositron => "(C) OpenStreetMap contributors (C) CARTO",
            Basemap::OpenTopoMap => {
                "Map data: (C) OpenStreetMap contributors, SRTM | Map style: (C) OpenTopoMap (CC-BY-SA)"
            }
            Basemap::ThunderforestOutdoors => {
                "Maps (C) Thunderforest, Data (C) OpenStreetMap contributors"
            }
        }
    }

    pub fn max_zoom(&self) -> u8 {
        match self {
            Basemap::OpenStreetMapMapnik => 19,
            Basemap::CartoDbPositron => 20,
            Basemap::OpenTopoMap => 17,
            Basemap::ThunderforestOutdoors => 22,
        }
    }

    /// XYZ tile URL template with `{z}`, `{x}`, `{y}` placeholders.
    ///
    /// # Errors
    /// [`PosterError::MissingApiKey`] for keyed providers when no key is given.
    pub fn url_template(&self, api_key: Option<&str>) -> Result<String> {
        let url = match self {
            Basemap::OpenStreetMapMapnik => {
                "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
            }
            Basemap::CartoDbPositron => {
                "https://a.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png".to_string()
            }
            Basemap::OpenTopoMap => "https://a.tile.opentopomap.org/{z}/{x}/{y}.png".to_string(),
            Basemap::ThunderforestOutdoors => {
                let key = api_key
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| PosterError::MissingApiKey {
                        basemap: self.name().to_string(),
                    })?;
                format!(
                    "https://tile.thunderforest.com/outdoors/{{z}}/{{x}}/{{y}}.png?apikey={}",
                    key.trim()
                )
            }
        };
        Ok(url)
    }

    /// Full provider description for the renderer.
    pub fn tile_source(&self, api_key: Option<&str>) -> Result<TileSource> {
        Ok(TileSource {
            name: self.name().to_string(),
            url_template: self.url_template(api_key)?,
            attribution: self.attribution().to_string(),
            max_zoom: self.max_zoom(),
        })
    }

    /// Basemaps that can be offered, given whether an API key is configured.
    pub fn available(has_api_key: bool) -> Vec<Basemap> {
        Self::ALL
            .into_iter()
            .filter(|b| has_api_key || !b.requires_api_key())
            .collect()
    }
}
