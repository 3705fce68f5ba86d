use super::Config;
use crate::constants::MAX_HTTP_TIMEOUT_SECONDS;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Base URLs cannot be empty and must start with `http://` or `https://`
/// - HTTP timeout must be between 1 and `MAX_HTTP_TIMEOUT_SECONDS`
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_base_url("Jolpica", &config.jolpica_base_url)?;
    validate_base_url("OpenF1", &config.openf1_base_url)?;

    if config.http_timeout_seconds == 0 || config.http_timeout_seconds > MAX_HTTP_TIMEOUT_SECONDS
    {
        return Err(AppError::config_error(format!(
            "HTTP timeout must be between 1 and {MAX_HTTP_TIMEOUT_SECONDS} seconds, got {}",
            config.http_timeout_seconds
        )));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

fn validate_base_url(label: &str, url: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::config_error(format!(
            "{label} base URL cannot be empty"
        )));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "{label} base URL must start with http:// or https://, got '{url}'"
        )));
    }
    Ok(())
}
