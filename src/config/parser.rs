use crate::config::types::ConfigFile;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The file only supplies defaults; it is validated once merged with the
/// command-line flags.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ConfigFile)` - Successfully loaded configuration
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sumi_harvest::config::load_config;
///
/// let file = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Pages: {:?}", file.crawl.pages);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<ConfigFile> {
    let content = std::fs::read_to_string(path)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config)
}
