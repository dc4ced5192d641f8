//! Batch Converter
//!
//! Walks the input folder once (non-recursive, sorted by name), converts
//! every file the active direction accepts, and reports one entry per file.
//! Files are processed strictly one after another.

use crate::codec::{decode_image, file_size, save_image, OutputFormat};
use crate::compressor::{CompressionOutcome, QualitySearch};
use crate::naming::ConvertibleFile;
use crate::request::{ConversionRequest, DecodePolicy, Direction, EncodeMode};
use serde::{Deserialize, Serialize};
use shared_utils::{collect_files_by_suffix, BatchResult, ConvertError, FileSize, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Single encode; `quality` is `None` for PNG, which ignores it.
    Direct { quality: Option<u8>, size: FileSize },
    /// Size-targeted search.
    Compressed(CompressionOutcome),
    /// Not converted (undecodable under [`DecodePolicy::Skip`]).
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub input_size: FileSize,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn output_size(&self) -> Option<FileSize> {
        match &self.outcome {
            FileOutcome::Direct { size, .. } => Some(*size),
            FileOutcome::Compressed(outcome) => Some(outcome.final_size),
            FileOutcome::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub direction: Direction,
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub files: Vec<FileReport>,
    pub elapsed_secs: f64,
}

impl BatchReport {
    /// Counters for the summary report.
    pub fn summary(&self) -> BatchResult {
        let mut result = BatchResult::new();
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Direct { .. } => result.success(),
                FileOutcome::Compressed(outcome) if outcome.target_met => result.success(),
                FileOutcome::Compressed(_) => result.target_missed(),
                FileOutcome::Skipped { reason } => result.skip(file.source.clone(), reason.clone()),
            }
        }
        result
    }

    /// Bytes read from sources that produced an output.
    pub fn input_bytes(&self) -> u64 {
        self.files
            .iter()
            .filter(|f| f.output_size().is_some())
            .map(|f| f.input_size.bytes())
            .sum()
    }

    pub fn output_bytes(&self) -> u64 {
        self.files
            .iter()
            .filter_map(|f| f.output_size())
            .map(|s| s.bytes())
            .sum()
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }
}

/// Convert every eligible file of `request.input_folder()` into
/// `request.output_folder()`, creating the latter if needed.
///
/// Under [`DecodePolicy::Abort`] the first undecodable file ends the batch
/// with [`ConvertError::Decode`]; files converted before it stay on disk.
/// IO and encode failures always end the batch.
pub fn convert_batch(request: ConversionRequest) -> Result<BatchReport> {
    let start = Instant::now();
    let direction = request.direction();
    let input_folder = request.input_folder().to_path_buf();
    let output_folder = request.output_folder().to_path_buf();

    std::fs::create_dir_all(&output_folder).map_err(|e| ConvertError::io(&output_folder, e))?;

    let sources = collect_files_by_suffix(&input_folder, direction.source_suffixes())
        .map_err(|e| ConvertError::io(&input_folder, e))?;

    info!(
        direction = %direction,
        input = %input_folder.display(),
        output = %output_folder.display(),
        "Found {} file(s) to convert",
        sources.len()
    );

    let search = QualitySearch::default();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut files = Vec::with_capacity(sources.len());

    for source in sources {
        let Some(convertible) = ConvertibleFile::derive(&source, direction) else {
            debug!(path = %source.display(), "Skipping file with non-UTF-8 name");
            continue;
        };
        let output_path = convertible.output_path(&output_folder);
        let input_size = file_size(&source)?;

        let image = match decode_image(&source) {
            Ok(image) => image,
            Err(e @ ConvertError::Decode { .. }) => match request.decode_policy() {
                DecodePolicy::Abort => return Err(e),
                DecodePolicy::Skip => {
                    warn!("Skipping {}: {}", convertible.source_name(), e);
                    files.push(FileReport {
                        source,
                        output: output_path,
                        format: convertible.output_format,
                        input_size,
                        outcome: FileOutcome::Skipped {
                            reason: e.to_string(),
                        },
                    });
                    continue;
                }
            },
            Err(e) => return Err(e),
        };

        if let Some(previous) = claimed.insert(output_path.clone(), source.clone()) {
            warn!(
                "{} and {} both map to {}; the later one overwrites it",
                previous.display(),
                source.display(),
                convertible.output_name
            );
        }

        let outcome = match request.encode_mode() {
            EncodeMode::TargetSize(target_kb) => {
                info!(
                    "Compressing {} to {} (target {} KB)",
                    convertible.source_name(),
                    convertible.output_name,
                    target_kb
                );
                let outcome = search.run(
                    &image,
                    &output_path,
                    convertible.output_format,
                    target_kb,
                    request.write_strategy(),
                )?;
                FileOutcome::Compressed(outcome)
            }
            EncodeMode::Fixed(quality) => {
                let size = save_image(&image, &output_path, convertible.output_format, quality)?;
                info!(
                    "Converted {} to {}",
                    convertible.source_name(),
                    convertible.output_name
                );
                FileOutcome::Direct {
                    quality: convertible.output_format.uses_quality().then_some(quality),
                    size,
                }
            }
        };

        files.push(FileReport {
            source,
            output: output_path,
            format: convertible.output_format,
            input_size,
            outcome,
        });
    }

    Ok(BatchReport {
        direction,
        input_folder,
        output_folder,
        files,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}
