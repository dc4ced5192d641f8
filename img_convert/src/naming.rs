//! Output name derivation.

use crate::codec::OutputFormat;
use crate::request::Direction;
use shared_utils::common_utils::{file_stem_str, has_suffix};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A source file accepted by the active direction, with its derived output
/// name and format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertibleFile {
    pub source_path: PathBuf,
    pub output_name: String,
    pub output_format: OutputFormat,
}

impl ConvertibleFile {
    /// `None` when the file name does not end with one of the direction's
    /// source suffixes (case-sensitive) or is not valid UTF-8.
    pub fn derive(source: &Path, direction: Direction) -> Option<Self> {
        if !has_suffix(source, direction.source_suffixes()) {
            return None;
        }
        let stem = file_stem_str(source)?;
        let output_format = direction.output_format();
        Some(Self {
            source_path: source.to_path_buf(),
            output_name: format!("{}.{}", stem, output_format.extension()),
            output_format,
        })
    }

    pub fn output_path(&self, output_folder: &Path) -> PathBuf {
        output_folder.join(&self.output_name)
    }

    pub fn source_name(&self) -> Cow<'_, str> {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.source_path.to_string_lossy())
    }
}
