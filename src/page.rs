//! Fixed page grid of the poster.
//!
//! The page is split top to bottom into a title band, the map panel and a footer;
//! the footer is split again into an info band and the elevation profile band.
//! Positions are figure fractions (0..1, origin bottom-left), laid out the way a
//! plotting grid lays out rows: equal gaps of `hspace` times the mean row height,
//! row heights proportional to their ratios.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

/// A rectangle in figure-fraction coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelRect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelRect {
    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Page size, margins and band ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page width in inches. Default: 8.27 (A4)
    pub width_in: f64,
    /// Page height in inches. Default: 11.69 (A4)
    pub height_in: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Gap between bands as a fraction of the mean band height. Default: 0.1
    pub hspace: f64,
    /// Title, map and footer heights. Default: [0.05, 0.70, 0.25]
    pub band_ratios: [f64; 3],
    /// Footer info and profile heights. Default: [0.3, 0.7]
    pub footer_ratios: [f64; 2],
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_in: 8.27,
            height_in: 11.69,
            margin_left: 0.05,
            margin_right: 0.95,
            margin_top: 0.98,
            margin_bottom: 0.05,
            hspace: 0.1,
            band_ratios: [0.05, 0.70, 0.25],
            footer_ratios: [0.3, 0.7],
        }
    }
}

impl PageConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(PosterError::InvalidConfig { message });

        if !(self.width_in > 0.0 && self.height_in > 0.0)
            || !self.width_in.is_finite()
            || !self.height_in.is_finite()
        {
            return invalid(format!(
                "page size must be positive and finite, got {} x {}",
                self.width_in, self.height_in
            ));
        }
        if !(0.0 <= self.margin_left && self.margin_left < self.margin_right && self.margin_right <= 1.0)
        {
            return invalid(format!(
                "horizontal margins out of order: {} .. {}",
                self.margin_left, self.margin_right
            ));
        }
        if !(0.0 <= self.margin_bottom && self.margin_bottom < self.margin_top && self.margin_top <= 1.0)
        {
            return invalid(format!(
                "vertical margins out of order: {} .. {}",
                self.margin_bottom, self.margin_top
            ));
        }
        if !(self.hspace >= 0.0) || !self.hspace.is_finite() {
            return invalid(format!(
                "hspace must be finite and non-negative, got {}",
                self.hspace
            ));
        }
        let mut ratios = self.band_ratios.iter().chain(self.footer_ratios.iter());
        if ratios.any(|r| !(*r > 0.0) || !r.is_finite()) {
            return invalid("band ratios must be positive".to_string());
        }
        Ok(())
    }
}

/// Resolved page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width_in: f64,
    pub height_in: f64,
    pub title: PanelRect,
    /// Full map band
    pub map: PanelRect,
    /// Largest centered square inside the map band (in physical units)
    pub map_square: PanelRect,
    pub info: PanelRect,
    pub profile: PanelRect,
}

impl PageLayout {
    /// Compute the page layout.
    pub fn compute(config: &PageConfig) -> Result<Self> {
        config.validate()?;

        let area = PanelRect {
            left: config.margin_left,
            bottom: config.margin_bottom,
            width: config.margin_right - config.margin_left,
            height: config.margin_top - config.margin_bottom,
        };

        let bands = split_rows(&area, &config.band_ratios, config.hspace);
        let (title, map, footer) = (bands[0], bands[1], bands[2]);

        let footer_rows = split_rows(&footer, &config.footer_ratios, config.hspace);
        let (info, profile) = (footer_rows[0], footer_rows[1]);

        let map_square = fit_square(&map, config.width_in, config.height_in);

        Ok(Self {
            width_in: config.width_in,
            height_in: config.height_in,
            title,
            map,
            map_square,
            info,
            profile,
        })
    }
}

/// Split a rectangle into rows, top to bottom.
///
/// With `n` rows, the mean row height is `h / (n + hspace * (n - 1))`; gaps are
/// `hspace` times that, and row heights are scaled by `ratio / mean(ratios)`.
pub fn split_rows(area: &PanelRect, ratios: &[f64], hspace: f64) -> Vec<PanelRect> {
    let n = ratios.len();
    if n == 0 {
        return Vec::new();
    }

    let cell_h = area.height / (n as f64 + hspace * (n as f64 - 1.0));
    let sep_h = hspace * cell_h;
    let norm = cell_h * n as f64 / ratios.iter().sum::<f64>();

    let mut rows = Vec::with_capacity(n);
    let mut top = area.top();
    for (i, ratio) in ratios.iter().enumerate() {
        if i > 0 {
            top -= sep_h;
        }
        let height = ratio * norm;
        rows.push(PanelRect {
            left: area.left,
            bottom: top - height,
            width: area.width,
            height,
        });
        top -= height;
    }
    rows
}

/// Largest square (in physical units) centered in a panel.
pub fn fit_square(panel: &PanelRect, page_width_in: f64, page_height_in: f64) -> PanelRect {
    let width_in = panel.width * page_width_in;
    let height_in = panel.height * page_height_in;
    let side_in = width_in.min(height_in);

    let width = side_in / page_width_in;
    let height = side_in / page_height_in;

    PanelRect {
        left: panel.left + (panel.width - width) / 2.0,
        bottom: panel.bottom + (panel.height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_default_bands_stack_within_margins() {
        let page = PageLayout::compute(&PageConfig::default()).unwrap();

        assert!((page.title.top() - 0.98).abs() < EPS);
        assert!((page.profile.bottom - 0.05).abs() < EPS);
        assert!(page.title.bottom > page.map.top());
        assert!(page.map.bottom > page.info.top());
        assert!(page.info.bottom > page.profile.top());
        assert!((page.map.left - 0.05).abs() < EPS);
        assert!((page.map.right() - 0.95).abs() < EPS);
    }

    #[test]
    fn test_default_band_heights() {
        let page = PageLayout::compute(&PageConfig::default()).unwrap();

        // 0.93 / (3 + 0.1 * 2) = 0.290625 mean row height
        let cell = 0.93 / 3.2;
        assert!((page.title.height - 0.05 * 3.0 * cell).abs() < EPS);
        assert!((page.map.height - 0.70 * 3.0 * cell).abs() < EPS);
        assert!((page.info.height / page.profile.height - 0.3 / 0.7).abs() < EPS);
    }

    #[test]
    fn test_split_rows_without_gaps() {
        let area = PanelRect {
            left: 0.0,
            bottom: 0.0,
            width: 1.0,
            height: 1.0,
        };
        let rows = split_rows(&area, &[1.0, 3.0], 0.0);
        assert!((rows[0].height - 0.25).abs() < EPS);
        assert!((rows[0].bottom - 0.75).abs() < EPS);
        assert!((rows[1].height - 0.75).abs() < EPS);
        assert!(rows[1].bottom.abs() < EPS);
        assert!(split_rows(&area, &[], 0.1).is_empty());
    }

    #[test]
    fn test_map_square_is_square_on_paper() {
        let config = PageConfig::default();
        let page = PageLayout::compute(&config).unwrap();
        let sq = page.map_square;

        let w_in = sq.width * config.width_in;
        let h_in = sq.height * config.height_in;
        assert!((w_in - h_in).abs() < EPS);
        assert!(sq.left >= page.map.left - EPS && sq.right() <= page.map.right() + EPS);
        assert!(sq.bottom >= page.map.bottom - EPS && sq.top() <= page.map.top() + EPS);
    }

    #[test]
    fn test_invalid_page_config() {
        let config = PageConfig {
            margin_left: 0.9,
            margin_right: 0.1,
            ..PageConfig::default()
        };
        assert!(PageLayout::compute(&config).is_err());

        let config = PageConfig {
            band_ratios: [0.05, 0.0, 0.25],
            ..PageConfig::default()
        };
        assert!(PageLayout::compute(&config).is_err());
    }

    #[test]
    fn test_infinite_page_values_are_rejected() {
        let configs = [
            PageConfig {
                hspace: f64::INFINITY,
                ..PageConfig::default()
            },
            PageConfig {
                width_in: f64::INFINITY,
                ..PageConfig::default()
            },
            PageConfig {
                height_in: f64::INFINITY,
                ..PageConfig::default()
            },
        ];
        for config in configs {
            assert!(matches!(
                PageLayout::compute(&config),
                Err(PosterError::InvalidConfig { .. })
            ));
        }
    }
}
