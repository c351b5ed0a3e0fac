use serde::Deserialize;
use std::path::PathBuf;

/// Default query parameter carrying the page number
pub const DEFAULT_PAGINATION_KEY: &str = "PageNum";

/// Default directory downloaded pages are written to
pub const DEFAULT_OUTPUT_DIR: &str = "target";

/// Default number of result pages to walk
pub const DEFAULT_PAGE_COUNT: u32 = 1;

/// Default capacity of the request channel between producer and worker
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Contents of an optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub crawl: CrawlSettings,

    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawl settings as supplied by a config file or command-line flags
///
/// Every field is optional so that sources can be layered; see
/// `CrawlSettings::merge`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlSettings {
    /// Search endpoint the page parameter is appended to
    pub codebase: Option<String>,

    /// Name of the pagination query parameter
    pub key: Option<String>,

    /// Output directory for downloaded pages
    pub dir: Option<PathBuf>,

    /// Number of result pages to fetch
    pub pages: Option<u32>,

    /// Capacity of the request channel
    #[serde(rename = "channel-capacity")]
    pub channel_capacity: Option<usize>,
}

impl CrawlSettings {
    /// Layers `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: CrawlSettings) -> CrawlSettings {
        CrawlSettings {
            codebase: overrides.codebase.or(self.codebase),
            key: overrides.key.or(self.key),
            dir: overrides.dir.or(self.dir),
            pages: overrides.pages.or(self.pages),
            channel_capacity: overrides.channel_capacity.or(self.channel_capacity),
        }
    }

    /// Fills in defaults for every unset field
    pub fn into_config(self, user_agent: UserAgentConfig) -> CrawlConfig {
        CrawlConfig {
            base_url: self.codebase.unwrap_or_default(),
            pagination_key: self
                .key
                .unwrap_or_else(|| DEFAULT_PAGINATION_KEY.to_string()),
            output_dir: self
                .dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            page_count: self.pages.unwrap_or(DEFAULT_PAGE_COUNT),
            channel_capacity: self.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            user_agent,
        }
    }
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Version reported in the user agent
    #[serde(default = "default_agent_version")]
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

fn default_agent_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Fully resolved configuration for a crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Search endpoint, e.g. `https://example.com/search`
    pub base_url: String,

    /// Query parameter carrying the page number
    pub pagination_key: String,

    /// Directory partner pages are written to
    pub output_dir: PathBuf,

    /// Number of result pages to fetch (at least 1)
    pub page_count: u32,

    /// Capacity of the request channel (at least 1)
    pub channel_capacity: usize,

    /// User agent sent with every request
    pub user_agent: UserAgentConfig,
}

impl CrawlConfig {
    /// Creates a configuration for `base_url` with every other field defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        CrawlSettings {
            codebase: Some(base_url.into()),
            ..Default::default()
        }
        .into_config(UserAgentConfig::default())
    }
}
