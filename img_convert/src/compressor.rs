//! Size-Targeting Compressor
//!
//! Descending linear scan over encoder quality: start at 95, step down by 5,
//! stop at the first quality whose output is at or under the target, give up
//! once the quality would drop below 10. Not a binary search: the first
//! match from the top wins, so the scan is strictly sequential.
//!
//! When the target is never met the file on disk holds the last (lowest)
//! attempt, not the smallest or best one.

use crate::codec::{encode_to_vec, write_encoded, OutputFormat};
use crate::request::WriteStrategy;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use shared_utils::{FileSize, Result};
use std::path::Path;
use tracing::{debug, info, warn};

pub const START_QUALITY: u8 = 95;
pub const MIN_QUALITY: u8 = 10;
pub const QUALITY_STEP: u8 = 5;

/// One encode of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityAttempt {
    pub quality: u8,
    pub size: FileSize,
}

impl QualityAttempt {
    pub fn size_kb(&self) -> f64 {
        self.size.kb()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionOutcome {
    /// Quality of the encoding left on disk.
    pub final_quality: u8,
    pub final_size_kb: f64,
    pub final_size: FileSize,
    pub target_kb: u64,
    pub target_met: bool,
    /// Every quality tried, in order.
    pub attempts: Vec<QualityAttempt>,
}

/// Parameters of the step-down scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySearch {
    pub start: u8,
    pub min: u8,
    pub step: u8,
}

impl Default for QualitySearch {
    fn default() -> Self {
        Self {
            start: START_QUALITY,
            min: MIN_QUALITY,
            step: QUALITY_STEP,
        }
    }
}

impl QualitySearch {
    /// Qualities in scan order: `start, start - step, ...` while `>= min`.
    pub fn qualities(&self) -> impl Iterator<Item = u8> {
        let (min, step) = (self.min, self.step);
        std::iter::successors(Some(self.start), move |&q| {
            if step == 0 {
                None
            } else {
                q.checked_sub(step)
            }
        })
        .take_while(move |&q| q >= min)
    }

    /// Run the scan for one image.
    ///
    /// With [`WriteStrategy::EveryAttempt`] each trial is written to
    /// `output_path` and measured there. With [`WriteStrategy::FinalOnly`]
    /// trials stay in memory and only the final one is written; the scan
    /// order, the stopping point and the final file are the same.
    ///
    /// An IO or encode failure aborts the scan with no outcome.
    pub fn run(
        &self,
        image: &DynamicImage,
        output_path: &Path,
        format: OutputFormat,
        target_kb: u64,
        strategy: WriteStrategy,
    ) -> Result<CompressionOutcome> {
        let mut attempts = Vec::new();
        let mut pending: Option<Vec<u8>> = None;

        for quality in self.qualities() {
            let bytes = encode_to_vec(image, format, quality, output_path)?;
            let size = match strategy {
                WriteStrategy::EveryAttempt => write_encoded(output_path, &bytes)?,
                WriteStrategy::FinalOnly => {
                    let size = FileSize::new(bytes.len() as u64);
                    pending = Some(bytes);
                    size
                }
            };

            info!("Trying quality {}, file size: {:.2} KB", quality, size.kb());
            attempts.push(QualityAttempt { quality, size });

            if size.fits_within_kb(target_kb) {
                break;
            }
        }

        if let Some(bytes) = pending {
            write_encoded(output_path, &bytes)?;
        }

        let Some(last) = attempts.last().copied() else {
            debug!(
                start = self.start,
                min = self.min,
                step = self.step,
                "Quality search has no steps"
            );
            return Ok(CompressionOutcome {
                final_quality: self.start,
                final_size_kb: 0.0,
                final_size: FileSize::ZERO,
                target_kb,
                target_met: false,
                attempts,
            });
        };

        let target_met = last.size.fits_within_kb(target_kb);
        if target_met {
            info!("Successfully compressed image to {:.2} KB", last.size_kb());
        } else {
            warn!(
                path = %output_path.display(),
                "Could not reach the target size of {} KB. Final size: {:.2} KB",
                target_kb,
                last.size_kb()
            );
        }

        Ok(CompressionOutcome {
            final_quality: last.quality,
            final_size_kb: last.size_kb(),
            final_size: last.size,
            target_kb,
            target_met,
            attempts,
        })
    }
}

/// Search for the highest quality in 95, 90, ..., 10 whose output fits in
/// `target_size_kb`, writing every attempt to `output_path`.
pub fn compress_to_target(
    image: &DynamicImage,
    output_path: &Path,
    format: OutputFormat,
    target_size_kb: u64,
) -> Result<CompressionOutcome> {
    QualitySearch::default().run(
        image,
        output_path,
        format,
        target_size_kb,
        WriteStrategy::EveryAttempt,
    )
}
