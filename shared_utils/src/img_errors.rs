//! Shared Conversion Error Types
//!
//! One taxonomy for every stage of a conversion run: request validation,
//! decoding, encoding and filesystem access.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid conversion type selected: {0:?} (expected 1, 2, jpg-to-png or png-to-jpg)")]
    InvalidDirection(String),

    #[error("Quality level must be between 1 and 5, got {0}")]
    QualityLevelOutOfRange(i64),

    #[error("Encoder quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn decode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        ConvertError::Decode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn encode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        ConvertError::Encode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Raised while building a request, before any file is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::InvalidDirection(_)
                | ConvertError::QualityLevelOutOfRange(_)
                | ConvertError::InvalidQuality(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
