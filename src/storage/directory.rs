//! Destination directory resolution

use crate::SpiderError;
use std::path::{Path, PathBuf};

/// Characters that are reserved or unsafe in path segments on common filesystems
const RESERVED_PATH_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces every reserved path character in `keyword` with an underscore
///
/// # Example
///
/// ```
/// use image_spider::storage::sanitize_keyword;
///
/// assert_eq!(sanitize_keyword("a/b:c"), "a_b_c");
/// assert_eq!(sanitize_keyword("cats"), "cats");
/// ```
pub fn sanitize_keyword(keyword: &str) -> String {
    keyword
        .chars()
        .map(|c| if RESERVED_PATH_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Removes embedded double quotes, as left behind by shell "copy as path"
pub fn strip_quotes(path: &str) -> String {
    path.replace('"', "")
}

/// Resolves and creates the directory a crawl writes into
///
/// A caller-supplied path is used verbatim apart from quote stripping. Without
/// one, the destination is `{root}/{sanitized keyword}`. A blank override is
/// treated as no override. Missing parents are created and an existing
/// directory is accepted as-is.
///
/// # Arguments
///
/// * `root` - Directory under which per-keyword folders live
/// * `keyword` - The search keyword
/// * `custom` - Optional caller-supplied destination
///
/// # Returns
///
/// * `Ok(PathBuf)` - The existing destination directory
/// * `Err(SpiderError::Filesystem)` - The directory could not be created
pub fn resolve_destination(
    root: &Path,
    keyword: &str,
    custom: Option<&str>,
) -> Result<PathBuf, SpiderError> {
    let destination = match custom.map(strip_quotes) {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => root.join(sanitize_keyword(keyword)),
    };

    std::fs::create_dir_all(&destination).map_err(|source| SpiderError::Filesystem {
        path: destination.clone(),
        source,
    })?;

    tracing::debug!("Destination directory ready: {}", destination.display());
    Ok(destination)
}
