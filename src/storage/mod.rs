//! Storage module for persisting downloaded images
//!
//! This module owns the on-disk layout of a crawl:
//! - Destination directory resolution and creation
//! - Keyword sanitization for directory and file names
//! - Sequential `{keyword}_{n}.jpg` file naming
//! - Whole-payload image writes that never leave partial files behind

mod directory;
mod image_file;

pub use directory::{resolve_destination, sanitize_keyword, strip_quotes};
pub use image_file::{image_file_name, image_path, write_image};
