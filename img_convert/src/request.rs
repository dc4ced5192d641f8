//! Conversion Request Module
//!
//! The immutable description of one conversion run. Built once from
//! validated user input and handed by value to the batch converter; nothing
//! from the presentation layer reaches the core except through this type.

use crate::codec::OutputFormat;
use serde::{Deserialize, Serialize};
use shared_utils::{ConvertError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// JPEG quality used when neither a target size nor a quality level is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encoder quality for user-facing levels 1..=5.
pub const QUALITY_LEVEL_TABLE: [u8; 5] = [10, 30, 50, 75, 95];

// ============================================================================
// Direction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    JpgToPng,
    PngToJpg,
}

impl Direction {
    /// File name suffixes accepted as input, matched case-sensitively.
    pub const fn source_suffixes(self) -> &'static [&'static str] {
        match self {
            Direction::JpgToPng => &[".jpg", ".jpeg"],
            Direction::PngToJpg => &[".png"],
        }
    }

    pub const fn output_format(self) -> OutputFormat {
        match self {
            Direction::JpgToPng => OutputFormat::Png,
            Direction::PngToJpg => OutputFormat::Jpeg,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::JpgToPng => "JPG → PNG",
            Direction::PngToJpg => "PNG → JPG",
        }
    }
}

impl FromStr for Direction {
    type Err = ConvertError;

    /// Accepts the radio-button codes `1`/`2` as well as the spelled-out names.
    fn from_str(code: &str) -> Result<Self> {
        match code.trim() {
            "1" | "jpg-to-png" | "jpg_to_png" => Ok(Direction::JpgToPng),
            "2" | "png-to-jpg" | "png_to_jpg" => Ok(Direction::PngToJpg),
            other => Err(ConvertError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// QualityLevel
// ============================================================================

/// User-facing quality level in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QualityLevel(u8);

impl QualityLevel {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(level: i64) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(ConvertError::QualityLevelOutOfRange(level))
        }
    }

    /// Encoder quality percentage for this level.
    #[inline]
    pub fn encoder_quality(&self) -> u8 {
        QUALITY_LEVEL_TABLE[(self.0 - 1) as usize]
    }
}

// ============================================================================
// Policies
// ============================================================================

/// What to do when a matched file cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Stop the batch at the failing file; earlier outputs stay on disk.
    #[default]
    Abort,
    /// Log a warning, record the file as skipped and continue.
    Skip,
}

/// How the size-targeting search persists its trial encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteStrategy {
    /// Write the output file on every attempt and measure it on disk.
    #[default]
    EveryAttempt,
    /// Encode trials in memory; write only the accepted or last attempt.
    FinalOnly,
}

/// How each file of the batch gets encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// Run the quality step search against this ceiling in KB.
    TargetSize(u64),
    /// Single encode at this quality (ignored by PNG).
    Fixed(u8),
}

// ============================================================================
// ConversionRequest
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    input_folder: PathBuf,
    output_folder: PathBuf,
    direction: Direction,
    target_size_kb: Option<u64>,
    fixed_quality: Option<u8>,
    decode_policy: DecodePolicy,
    write_strategy: WriteStrategy,
}

impl ConversionRequest {
    pub fn new(
        input_folder: impl Into<PathBuf>,
        output_folder: impl Into<PathBuf>,
        direction: Direction,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_folder: output_folder.into(),
            direction,
            target_size_kb: None,
            fixed_quality: None,
            decode_policy: DecodePolicy::default(),
            write_strategy: WriteStrategy::default(),
        }
    }

    /// Validate raw presentation-layer values: a direction code, an optional
    /// target size in KB and an optional 1..=5 quality level. Fails before
    /// anything touches the filesystem.
    pub fn from_user_input(
        input_folder: impl Into<PathBuf>,
        output_folder: impl Into<PathBuf>,
        direction_code: &str,
        target_size_kb: Option<u64>,
        quality_level: Option<i64>,
    ) -> Result<Self> {
        let direction: Direction = direction_code.parse()?;
        let quality_level = quality_level.map(QualityLevel::new).transpose()?;

        let mut request =
            Self::new(input_folder, output_folder, direction).with_target_size_kb(target_size_kb);
        if let Some(level) = quality_level {
            request = request.with_quality_level(level);
        }
        Ok(request)
    }

    /// A target of 0 is treated as unset.
    pub fn with_target_size_kb(mut self, target_size_kb: Option<u64>) -> Self {
        self.target_size_kb = target_size_kb.filter(|&kb| kb > 0);
        self
    }

    pub fn with_quality_level(mut self, level: QualityLevel) -> Self {
        self.fixed_quality = Some(level.encoder_quality());
        self
    }

    /// Raw encoder quality, 1..=100.
    pub fn with_fixed_quality(mut self, quality: u8) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(ConvertError::InvalidQuality(quality));
        }
        self.fixed_quality = Some(quality);
        Ok(self)
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn with_write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.write_strategy = strategy;
        self
    }

    pub fn input_folder(&self) -> &Path {
        &self.input_folder
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn target_size_kb(&self) -> Option<u64> {
        self.target_size_kb
    }

    pub fn fixed_quality(&self) -> Option<u8> {
        self.fixed_quality
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy
    }

    pub fn write_strategy(&self) -> WriteStrategy {
        self.write_strategy
    }

    /// A target size wins over a fixed quality; with neither, the encoder
    /// default applies.
    pub fn encode_mode(&self) -> EncodeMode {
        match self.target_size_kb {
            Some(kb) => EncodeMode::TargetSize(kb),
            None => EncodeMode::Fixed(self.fixed_quality.unwrap_or(DEFAULT_JPEG_QUALITY)),
        }
    }
}
