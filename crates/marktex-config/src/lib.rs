//! Configuration management for MarkTeX.
//!
//! Parses `marktex.toml` with serde and provides auto-discovery of the config
//! file in the current directory and its parents. Command-line overrides are
//! applied on load via [`CliSettings`], and the result is validated so the
//! layout engine only ever sees in-range values.
//!
//! ```toml
//! [document]
//! font_size = 14
//! page_size = "Letter"
//! view_mode = "paged"
//!
//! [document.page_indicator]
//! position = "right"
//! format = "page-number-of-total"
//!
//! [assist]
//! api_key = "${GEMINI_API_KEY}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `assist.api_key`, `assist.model` and `assist.base_url` support `${VAR}`
//! (error if unset) and `${VAR:-default}`. When no `api_key` is configured the
//! key is read from [`API_KEY_ENV`].

mod expand;

use std::path::{Path, PathBuf};

use marktex_layout::{
    FONT_SIZE_RANGE, LINE_HEIGHT_RANGE, MARGINS_RANGE, PageSize, Settings, ViewMode,
};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "marktex.toml";

/// Environment variable consulted when `assist.api_key` is not set.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Command-line values that override the configuration file.
///
/// Only `Some` fields are applied.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub page_size: Option<PageSize>,
    pub view_mode: Option<ViewMode>,
    /// Page margins in rem.
    pub margins: Option<f32>,
    /// Base font size in pixels.
    pub font_size: Option<u32>,
    pub line_height: Option<f32>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document settings fed to every render pass.
    pub document: Settings,
    /// Content-generation assistant.
    pub assist: AssistConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content-generation assistant configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// API key. Falls back to [`API_KEY_ENV`] when absent.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// API base URL, without the trailing `/models/...` path.
    pub base_url: String,
    /// Maximum number of characters of the current document sent as context.
    pub context_limit: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: marktex_assist::DEFAULT_MODEL.to_owned(),
            base_url: marktex_assist::DEFAULT_BASE_URL.to_owned(),
            context_limit: marktex_assist::DEFAULT_CONTEXT_LIMIT,
            timeout_secs: marktex_assist::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assist.api_key`").
        field: String,
        /// Error message (e.g., "${`GEMINI_API_KEY`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration with optional CLI overrides.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `marktex.toml` in the current directory and its parents, falling
    /// back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or a value is out of range after overrides.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.expand_env_vars()?;
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file without validating it.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let document = &mut self.document;
        if let Some(page_size) = settings.page_size {
            document.page_size = page_size;
        }
        if let Some(view_mode) = settings.view_mode {
            document.view_mode = view_mode;
        }
        if let Some(margins) = settings.margins {
            document.margins = margins;
        }
        if let Some(font_size) = settings.font_size {
            document.font_size = font_size;
        }
        if let Some(line_height) = settings.line_height {
            document.line_height = line_height;
        }
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let assist = &mut self.assist;
        assist.model = expand::expand_env(&assist.model, "assist.model")?;
        assist.base_url = expand::expand_env(&assist.base_url, "assist.base_url")?;
        assist.api_key = match assist.api_key.take() {
            Some(key) => Some(expand::expand_env(&key, "assist.api_key")?),
            None => std::env::var(API_KEY_ENV).ok(),
        };
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_document()?;
        self.validate_assist()?;
        Ok(())
    }

    fn validate_document(&self) -> Result<(), ConfigError> {
        let document = &self.document;
        require_in_range(
            document.font_size,
            FONT_SIZE_RANGE.start(),
            FONT_SIZE_RANGE.end(),
            "document.font_size",
        )?;
        require_in_range(
            document.line_height,
            LINE_HEIGHT_RANGE.start(),
            LINE_HEIGHT_RANGE.end(),
            "document.line_height",
        )?;
        require_in_range(
            document.margins,
            MARGINS_RANGE.start(),
            MARGINS_RANGE.end(),
            "document.margins",
        )?;
        require_non_empty(&document.font_family, "document.font_family")?;
        if document.font_family.contains(['{', '}', ';', '<']) {
            return Err(ConfigError::Validation(
                "document.font_family contains invalid characters".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_assist(&self) -> Result<(), ConfigError> {
        let assist = &self.assist;
        require_non_empty(&assist.model, "assist.model")?;
        require_http_url(&assist.base_url, "assist.base_url")?;
        if assist.context_limit == 0 {
            return Err(ConfigError::Validation(
                "assist.context_limit must be greater than 0".to_owned(),
            ));
        }
        if assist.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "assist.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Search for `marktex.toml` in the current directory and its parents.
#[must_use]
pub fn discover_config() -> Option<PathBuf> {
    discover_config_from(&std::env::current_dir().ok()?)
}

/// Search for `marktex.toml` in `start` and its parents.
fn discover_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn require_in_range<T>(value: T, min: &T, max: &T, field: &str) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    // NaN fails both comparisons and is rejected here.
    if !(value >= *min && value <= *max) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktex_layout::{IndicatorPosition, PageNumberFormat};
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.document, Settings::default());
        assert_eq!(config.assist.model, "gemini-2.5-flash");
        assert_eq!(config.assist.context_limit, 10_000);
        assert_eq!(config.assist.base_url, marktex_assist::DEFAULT_BASE_URL);
        assert_eq!(config.assist.timeout_secs, marktex_assist::DEFAULT_TIMEOUT_SECS);
        assert!(config.config_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.document, Settings::default());
    }

    #[test]
    fn test_parse_document_section() {
        let toml = r#"
[document]
font_size = 14
line_height = 1.8
page_size = "Letter"
margins = 1.0
view_mode = "paged"
font_family = "Georgia, serif"

[document.page_indicator]
enabled = false
position = "right"
format = "page-number-of-total"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let document = &config.document;
        assert_eq!(document.font_size, 14);
        assert_eq!(document.line_height, 1.8);
        assert_eq!(document.page_size, PageSize::Letter);
        assert_eq!(document.margins, 1.0);
        assert_eq!(document.view_mode, ViewMode::Paged);
        assert_eq!(document.font_family, "Georgia, serif");
        assert!(!document.page_indicator.enabled);
        assert_eq!(document.page_indicator.position, IndicatorPosition::Right);
        assert_eq!(
            document.page_indicator.format,
            PageNumberFormat::PageNumberOfTotal
        );
    }

    #[test]
    fn test_parse_partial_indicator_keeps_defaults() {
        let toml = r#"
[document.page_indicator]
position = "left"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let indicator = config.document.page_indicator;
        assert!(indicator.enabled);
        assert_eq!(indicator.position, IndicatorPosition::Left);
        assert_eq!(indicator.format, PageNumberFormat::NumberTotal);
    }

    #[test]
    fn test_parse_unknown_page_size_fails() {
        let result: Result<Config, _> = toml::from_str("[document]\npage_size = \"A3\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            page_size: Some(PageSize::Letter),
            margins: Some(1.5),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.document.page_size, PageSize::Letter);
        assert_eq!(config.document.margins, 1.5);
        assert_eq!(config.document.font_size, 16);
        assert_eq!(config.document.view_mode, ViewMode::Continuous);
    }

    #[test]
    fn test_validate_rejects_out_of_range_font_size() {
        let mut config = Config::default();
        config.document.font_size = 30;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: document.font_size must be between 10 and 24, got 30"
        );
    }

    #[test]
    fn test_validate_rejects_nan_margins() {
        let mut config = Config::default();
        config.document.margins = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_range_bounds_inclusive() {
        let mut config = Config::default();
        config.document.font_size = 24;
        config.document.line_height = 1.0;
        config.document.margins = 0.0;
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_style_injection_in_font_family() {
        let mut config = Config::default();
        config.document.font_family = "serif; } body { display: none".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_assist() {
        let mut config = Config::default();
        config.assist.base_url = "ftp://example.com".to_owned();
        assert!(
            config
                .validate()
                .unwrap_err()
                .to_string()
                .contains("assist.base_url")
        );

        let mut config = Config::default();
        config.assist.context_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[document]\nfont_size = 12\n\n[assist]\napi_key = \"literal-key\"\n",
        );

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.document.font_size, 12);
        assert_eq!(config.assist.api_key.as_deref(), Some("literal-key"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[document]\nmargins = 9.0\n");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(err.to_string().contains("document.margins"));

        let overrides = CliSettings {
            margins: Some(2.0),
            ..Default::default()
        };
        let config = Config::load(Some(path.as_path()), Some(&overrides)).unwrap();
        assert_eq!(config.document.margins, 2.0);
    }

    #[test]
    fn test_load_expands_api_key() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("MARKTEX_TEST_LOAD_KEY", "from-env");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[assist]\napi_key = \"${MARKTEX_TEST_LOAD_KEY}\"\n",
        );

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.assist.api_key.as_deref(), Some("from-env"));
        unsafe {
            std::env::remove_var("MARKTEX_TEST_LOAD_KEY");
        }
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[document\n");
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("notes").join("drafts");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_config_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("book");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = write_config(&nested, "");

        assert_eq!(discover_config_from(&nested), Some(nearest));
    }
}
