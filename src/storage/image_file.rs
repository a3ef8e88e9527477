//! Image file naming and writing

use crate::storage::sanitize_keyword;
use std::io;
use std::path::{Path, PathBuf};

/// Returns the file name for the `index`-th successful download (1-based)
///
/// The extension is always `.jpg`, whatever the payload actually is.
pub fn image_file_name(keyword: &str, index: usize) -> String {
    format!("{}_{}.jpg", sanitize_keyword(keyword), index)
}

/// Returns the full path for the `index`-th successful download
pub fn image_path(destination: &Path, keyword: &str, index: usize) -> PathBuf {
    destination.join(image_file_name(keyword, index))
}

/// Writes a complete payload to `path`
///
/// Bytes go to a sibling `.part` file that is renamed into place once fully
/// written, so `path` either holds the whole payload or does not exist.
///
/// # Returns
///
/// * `Ok(u64)` - Number of bytes written
/// * `Err(io::Error)` - The write or rename failed; no file is left behind
pub async fn write_image(path: &Path, bytes: &[u8]) -> io::Result<u64> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = async {
        tokio::fs::write(&partial, bytes).await?;
        tokio::fs::rename(&partial, path).await
    }
    .await;

    if let Err(e) = result {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e);
    }

    Ok(bytes.len() as u64)
}
