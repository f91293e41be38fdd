//! Unified error handling for the track-poster library.
//!
//! Every failure in this crate is a local precondition failure: invalid input is
//! rejected immediately and never replaced with a default.

use std::fmt;

/// Unified error type for track-poster operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PosterError {
    /// No track points were supplied
    EmptyTrack,
    /// Bounding box has zero extent in both dimensions
    DegenerateTrack { width: f64, height: f64 },
    /// Padding factor outside [0, 0.5]
    InvalidPadding { padding_factor: f64 },
    /// Bounding box is inverted or not finite
    InvalidBounds { message: String },
    /// A track point has invalid GPS coordinates
    InvalidCoordinates { index: usize, message: String },
    /// Configuration error
    InvalidConfig { message: String },
    /// Basemap name not in the catalogue
    UnknownBasemap { name: String },
    /// Basemap requires an API key that was not provided
    MissingApiKey { basemap: String },
}

impl fmt::Display for PosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosterError::EmptyTrack => write!(f, "Track has no points"),
            PosterError::DegenerateTrack { width, height } => {
                write!(
                    f,
                    "Track bounding box is degenerate ({} x {})",
                    width, height
                )
            }
            PosterError::InvalidPadding { padding_factor } => {
                write!(
                    f,
                    "Padding factor {} outside allowed range [0, 0.5]",
                    padding_factor
                )
            }
            PosterError::InvalidBounds { message } => {
                write!(f, "Invalid bounding box: {}", message)
            }
            PosterError::InvalidCoordinates { index, message } => {
                write!(f, "Point {} has invalid coordinates: {}", index, message)
            }
            PosterError::InvalidConfig { message } => {
                write!(f, "Configuration error: {}", message)
            }
            PosterError::UnknownBasemap { name } => {
                write!(f, "Unknown basemap '{}'", name)
            }
            PosterError::MissingApiKey { basemap } => {
                write!(f, "Basemap '{}' requires an API key", basemap)
            }
        }
    }
}

impl std::error::Error for PosterError {}

/// Result type alias for track-poster operations.
pub type Result<T> = std::result::Result<T, PosterError>;

/// Extension trait for converting Option to PosterError.
pub trait OptionExt<T> {
    /// Convert Option to Result with an empty track error.
    fn ok_or_empty_track(self) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_empty_track(self) -> Result<T> {
        self.ok_or(PosterError::EmptyTrack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PosterError::InvalidPadding {
            padding_factor: 0.75,
        };
        assert!(err.to_string().contains("0.75"));

        let err = PosterError::InvalidCoordinates {
            index: 4,
            message: "latitude out of range".to_string(),
        };
        assert!(err.to_string().contains("Point 4"));
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        assert_eq!(none.ok_or_empty_track(), Err(PosterError::EmptyTrack));
        assert_eq!(Some(3).ok_or_empty_track(), Ok(3));
    }
}
