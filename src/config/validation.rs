use crate::config::types::{Config, DownloadConfig, HttpConfig, OutputConfig, SearchConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_http_config(&config.http)?;
    validate_download_config(&config.download)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the search feed configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    compile_candidate_pattern(&config.candidate_pattern)?;

    if config.page_step < 1 {
        return Err(ConfigError::Validation(
            "page-step must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP transport configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.page_timeout_secs < 1 || config.image_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeouts must be >= 1s, got page={}s image={}s",
            config.page_timeout_secs, config.image_timeout_secs
        )));
    }

    if config.image_timeout_secs > config.page_timeout_secs {
        return Err(ConfigError::Validation(format!(
            "image-timeout-secs ({}) must not exceed page-timeout-secs ({})",
            config.image_timeout_secs, config.page_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates download configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.retry_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts must be >= 1, got {}",
            config.retry_attempts
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Compiles the candidate pattern, requiring at least one capture group
pub(crate) fn compile_candidate_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    // `.` must cross line breaks: result pages embed JSON over many lines
    let regex = Regex::new(&format!("(?s){}", pattern))
        .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

    if regex.captures_len() < 2 {
        return Err(ConfigError::InvalidPattern(format!(
            "pattern '{}' must contain a capture group",
            pattern
        )));
    }

    Ok(regex)
}
