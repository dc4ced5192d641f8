//! Common Utilities Module
//!
//! Small path and filesystem helpers shared by the conversion tools.

use std::path::Path;

// ═══════════════════════════════════════════════════════════════
// File name matching
// ═══════════════════════════════════════════════════════════════

/// Case-sensitive check of a file name against literal suffixes such as
/// `".jpg"`. Names that are not valid UTF-8 never match.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::has_suffix;
///
/// assert!(has_suffix(Path::new("dir/photo.jpg"), &[".jpg", ".jpeg"]));
/// assert!(!has_suffix(Path::new("dir/photo.JPG"), &[".jpg", ".jpeg"]));
/// ```
pub fn has_suffix(path: &Path, suffixes: &[&str]) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| suffixes.iter().any(|s| name.ends_with(s)))
        .unwrap_or(false)
}

/// File name without its final extension: `"a.b.jpg"` gives `"a.b"` and a
/// leading-dot name such as `".jpg"` is kept whole.
pub fn file_stem_str(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
