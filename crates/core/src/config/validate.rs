use super::{types::Config, ConfigError};
use crate::report::Verbosity;

/// Validate configuration
/// Currently validates:
/// - Lidarr URL is present and http(s)
/// - API key is present
/// - Timeout is not 0
/// - Console verbosity is not `disabled` (the console always shows something)
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = config.lidarr.url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError(
            "lidarr.url cannot be empty".to_string(),
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "lidarr.url must start with http:// or https://, got '{}'",
            url
        )));
    }

    if config.lidarr.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "lidarr.api_key cannot be empty".to_string(),
        ));
    }

    if config.lidarr.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "lidarr.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.output.console == Verbosity::Disabled {
        return Err(ConfigError::ValidationError(
            "output.console cannot be 'disabled'".to_string(),
        ));
    }

    Ok(())
}
