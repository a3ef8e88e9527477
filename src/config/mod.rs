//! Configuration module for Image-Spider
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; missing sections fall back to the defaults used by
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use image_spider::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("spider.toml")).unwrap();
//! println!("Page step: {}", config.search.page_step);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DownloadConfig, HttpConfig, OutputConfig, SearchConfig, DEFAULT_USER_AGENT,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
pub(crate) use validation::compile_candidate_pattern;
