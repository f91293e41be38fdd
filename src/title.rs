//! Poster title layout: adaptive font size and two-line split.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

/// Configuration for title layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Longest title (in characters) still drawn at `base_size`. Default: 30
    pub max_chars: u32,
    /// Font size for short titles, in points. Default: 40
    pub base_size: u32,
    /// Smallest font size for long titles, in points. Default: 14
    pub min_size: u32,
    /// Words kept on the first line when the title is split. Default: 2
    pub max_words_first_line: usize,
    /// Display the title in capitals. Default: true
    pub uppercase: bool,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            max_chars: 30,
            base_size: 40,
            min_size: 14,
            max_words_first_line: 2,
            uppercase: true,
        }
    }
}

impl TitleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_size > self.base_size {
            return Err(PosterError::InvalidConfig {
                message: format!(
                    "title min_size {} exceeds base_size {}",
                    self.min_size, self.base_size
                ),
            });
        }
        Ok(())
    }
}

/// Title text split over two lines with its font size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleLayout {
    pub first_line: String,
    pub second_line: String,
    pub font_size: u32,
}

impl TitleLayout {
    /// Lay out a title: optional upper-casing, then sizing and splitting.
    ///
    /// # Example
    /// ```
    /// use track_poster::title::{TitleConfig, TitleLayout};
    ///
    /// let layout = TitleLayout::compose("Tour des glaciers de la Vanoise", &TitleConfig::default());
    /// assert_eq!(layout.first_line, "TOUR DES");
    /// assert_eq!(layout.second_line, "GLACIERS DE LA VANOISE");
    /// assert_eq!(layout.font_size, 38);
    /// ```
    pub fn compose(title: &str, config: &TitleConfig) -> Self {
        let display = if config.uppercase {
            title.to_uppercase()
        } else {
            title.to_string()
        };

        let font_size = adaptive_font_size(
            &display,
            config.max_chars,
            config.base_size,
            config.min_size,
        );
        let (first_line, second_line) = split_title(&display, config.max_words_first_line);

        Self {
            first_line,
            second_line,
            font_size,
        }
    }

    /// Both lines joined, skipping an empty first line.
    pub fn full_text(&self) -> String {
        if self.first_line.is_empty() {
            self.second_line.clone()
        } else {
            format!("{}\n{}", self.first_line, self.second_line)
        }
    }
}

/// Font size shrinking with title length.
///
/// Titles up to `max_chars` characters get `base_size`. Longer titles get
/// `floor(base_size * max_chars / len)`, never below `min_size`.
pub fn adaptive_font_size(title: &str, max_chars: u32, base_size: u32, min_size: u32) -> u32 {
    let length = title.chars().count() as u64;
    if length <= max_chars as u64 {
        return base_size;
    }
    let scaled = base_size as u64 * max_chars as u64 / length;
    // scaled < base_size here, so it fits back into u32
    (scaled as u32).max(min_size)
}

/// Split a title into two lines.
///
/// Titles of at most `max_words_first_line` words go entirely on the second line.
/// Otherwise the first `max_words_first_line` words form the first line and the rest
/// the second. Words are re-joined with single spaces.
pub fn split_title(title: &str, max_words_first_line: usize) -> (String, String) {
    let words: Vec<&str> = title.split_whitespace().collect();

    if words.len() <= max_words_first_line {
        return (String::new(), words.join(" "));
    }

    let (first, rest) = words.split_at(max_words_first_line);
    (first.join(" "), rest.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_keeps_base_size() {
        assert_eq!(adaptive_font_size("SHORT TITLE", 30, 40, 14), 40);
        assert_eq!(adaptive_font_size(&"X".repeat(30), 30, 40, 14), 40);
    }

    #[test]
    fn test_long_title_scales_down() {
        let title = "A VERY LONG TITLE EXCEEDING THIRTY CHARACTERS";
        assert_eq!(title.chars().count(), 45);
        // floor(40 * 30 / 45)
        assert_eq!(adaptive_font_size(title, 30, 40, 14), 26);
        // floor(40 * 30 / 46)
        assert_eq!(adaptive_font_size(&"X".repeat(46), 30, 40, 14), 26);
    }

    #[test]
    fn test_font_size_floor_and_monotonic() {
        assert_eq!(adaptive_font_size(&"X".repeat(200), 30, 40, 14), 14);

        let mut previous = u32::MAX;
        for len in 0..150 {
            let size = adaptive_font_size(&"é".repeat(len), 30, 40, 14);
            assert!(size <= previous);
            assert!(size >= 14);
            previous = size;
        }
    }

    #[test]
    fn test_font_size_counts_characters_not_bytes() {
        // 30 two-byte characters
        assert_eq!(adaptive_font_size(&"é".repeat(30), 30, 40, 14), 40);
    }

    #[test]
    fn test_split_title() {
        assert_eq!(
            split_title("TOUR DES GLACIERS DE LA VANOISE", 2),
            ("TOUR DES".to_string(), "GLACIERS DE LA VANOISE".to_string())
        );
        assert_eq!(
            split_title("  MONT   BLANC  ", 2),
            (String::new(), "MONT BLANC".to_string())
        );
        assert_eq!(split_title("", 2), (String::new(), String::new()));
        assert_eq!(
            split_title("UN DEUX TROIS", 0),
            (String::new(), "UN DEUX TROIS".to_string())
        );
    }

    #[test]
    fn test_compose_uppercases() {
        let layout = TitleLayout::compose("ultra trail", &TitleConfig::default());
        assert_eq!(layout.first_line, "");
        assert_eq!(layout.second_line, "ULTRA TRAIL");
        assert_eq!(layout.font_size, 40);
        assert_eq!(layout.full_text(), "ULTRA TRAIL");
    }

    #[test]
    fn test_compose_keeps_case_when_disabled() {
        let config = TitleConfig {
            uppercase: false,
            ..TitleConfig::default()
        };
        let layout = TitleLayout::compose("Grand Raid des Pyrénées", &config);
        assert_eq!(layout.first_line, "Grand Raid");
        assert_eq!(layout.full_text(), "Grand Raid\ndes Pyrénées");
    }

    #[test]
    fn test_invalid_title_config() {
        let config = TitleConfig {
            min_size: 50,
            ..TitleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
