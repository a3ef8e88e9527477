use serde::Deserialize;
use std::time::Duration;

/// Browser User-Agent sent with every request; search feeds tend to block
/// obvious bot identifiers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Main configuration structure for Image-Spider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Upstream search feed configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint; `word` and `pn` query parameters are appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Regex locating embedded image URLs in a result page (first capture group)
    #[serde(rename = "candidate-pattern")]
    pub candidate_pattern: String,

    /// Offset stride between result pages
    #[serde(rename = "page-step")]
    pub page_step: u32,

    /// Highest offset that will be requested
    #[serde(rename = "max-offset")]
    pub max_offset: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.baidu.com/search/flip?tn=baiduimage&ie=utf-8".to_string(),
            candidate_pattern: r#""objURL":"(.*?)""#.to_string(),
            page_step: 20,
            max_offset: 1000,
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for a result page request (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for an image request (seconds)
    #[serde(rename = "image-timeout-secs")]
    pub image_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout_secs: 30,
            image_timeout_secs: 15,
            connect_timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Download behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Total attempts per image, including the first
    #[serde(rename = "retry-attempts")]
    pub retry_attempts: u32,

    /// Pause between attempts for the same image (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// Pause after every successful download (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            retry_backoff_ms: 1000,
            delay_ms: 1000,
        }
    }
}

impl DownloadConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which per-keyword folders are created
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: "downloads".to_string(),
        }
    }
}
