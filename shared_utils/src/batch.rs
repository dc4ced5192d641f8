//! Batch Processing Module
//!
//! Directory enumeration and per-batch bookkeeping for the conversion tools.

use crate::common_utils::has_suffix;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Direct children of `dir` that are files whose name ends with one of
/// `suffixes` (case-sensitive), sorted by file name.
///
/// No recursion into sub-directories. An unreadable `dir` is an error;
/// an unreadable child is logged and skipped.
pub fn collect_files_by_suffix(dir: &Path, suffixes: &[&str]) -> io::Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(dir)?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a directory: {}", dir.display()),
        ));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_suffix(entry.path(), suffixes) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    /// Written, but the size target was not reached
    pub target_missed: usize,
    pub skipped: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    /// Counts as written: the file exists in the output folder.
    pub fn target_missed(&mut self) {
        self.total += 1;
        self.target_missed += 1;
    }

    pub fn skip(&mut self, path: PathBuf, reason: String) {
        self.total += 1;
        self.skipped += 1;
        self.errors.push((path, reason));
    }

    pub fn written(&self) -> usize {
        self.succeeded + self.target_missed
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_batch_result_new() {
        let result = BatchResult::new();
        assert_eq!(result.total, 0);
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.target_missed, 0);
        assert_eq!(result.skipped, 0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_batch_result_mixed() {
        let mut result = BatchResult::new();
        result.success();
        result.success();
        result.target_missed();
        result.skip(PathBuf::from("bad.png"), "corrupt".to_string());

        assert_eq!(result.total, 4);
        assert_eq!(result.written(), 3);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.total,
            result.succeeded + result.target_missed + result.skipped
        );
    }

    #[test]
    fn test_success_rate() {
        let result = BatchResult::new();
        assert!((result.success_rate() - 100.0).abs() < 0.01);

        let mut result = BatchResult::new();
        result.success();
        result.target_missed();
        assert!(
            (result.success_rate() - 50.0).abs() < 0.01,
            "1 met, 1 missed should be 50%, got {}",
            result.success_rate()
        );
    }

    #[test]
    fn test_collect_files_by_suffix_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        for name in ["c.jpeg", "a.jpg", "b.png", "d.JPG", "notes.txt"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }
        fs::create_dir(temp.path().join("nested.jpg")).unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/e.jpg"), b"x").unwrap();

        let files = collect_files_by_suffix(temp.path(), &[".jpg", ".jpeg"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.jpg", "c.jpeg"]);
    }

    #[test]
    fn test_collect_files_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let err = collect_files_by_suffix(&missing, &[".png"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_collect_files_on_plain_file_is_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.png");
        fs::write(&file, b"x").unwrap();
        assert!(collect_files_by_suffix(&file, &[".png"]).is_err());
    }
}
