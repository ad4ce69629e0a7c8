//! Pipeline settings deserialization and validation.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Parsed settings from a `showcase.toml` file.
///
/// Every key is optional; a missing file or key falls back to the defaults
/// used for the course showcase.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// GitHub organization whose repositories are listed.
    pub organization: String,

    /// Repository name prefix, e.g. `DSCI-532_2026_`.
    pub pattern: String,

    /// Base URL of the raw file host.
    pub raw_host: String,

    /// Branches tried in order when fetching a sketch.
    pub branches: Vec<String>,

    /// Path of the sketch inside each repository.
    pub sketch_path: String,

    /// File name the sketch is saved under in its group directory.
    pub sketch_file_name: String,

    /// Upper bound for a single sketch request, in seconds.
    pub fetch_timeout_secs: u64,

    /// Image used by pages whose group has no sketch.
    pub placeholder_image: String,

    /// Extension of generated page files.
    pub page_extension: String,

    /// Optional Handlebars template replacing the built-in page layout.
    /// Relative paths resolve against the base directory.
    pub page_template: Option<PathBuf>,
}

/// Default GitHub organization.
pub const DEFAULT_ORGANIZATION: &str = "UBC-MDS";

/// Default repository name prefix.
pub const DEFAULT_PATTERN: &str = "DSCI-532_2026_";

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            raw_host: "https://raw.githubusercontent.com".to_string(),
            branches: vec!["main".to_string(), "master".to_string()],
            sketch_path: "img/sketch.png".to_string(),
            sketch_file_name: "sketch.png".to_string(),
            fetch_timeout_secs: 10,
            placeholder_image: "https://via.placeholder.com/400x300?text=No+Sketch".to_string(),
            page_extension: "qmd".to_string(),
            page_template: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, returning defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first invalid key.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.organization.trim().is_empty() {
            return Err(fail("organization must not be empty".to_string()));
        }

        if self.pattern.is_empty() {
            return Err(fail("pattern must not be empty".to_string()));
        }

        if self.branches.is_empty() || self.branches.iter().any(|b| b.trim().is_empty()) {
            return Err(fail(
                "branches must list at least one non-empty branch name".to_string(),
            ));
        }

        if Url::parse(&self.raw_host).is_err() {
            return Err(fail(format!(
                "raw-host is not a valid URL: {}",
                self.raw_host
            )));
        }

        if Url::parse(&self.placeholder_image).is_err() {
            return Err(fail(format!(
                "placeholder-image is not a valid URL: {}",
                self.placeholder_image
            )));
        }

        if self.sketch_path.trim_matches('/').is_empty() {
            return Err(fail("sketch-path must not be empty".to_string()));
        }

        if self.sketch_file_name.is_empty() || has_separator(&self.sketch_file_name) {
            return Err(fail(
                "sketch-file-name must be a plain file name".to_string(),
            ));
        }

        if self.page_extension.is_empty()
            || has_separator(&self.page_extension)
            || self.page_extension.contains('.')
        {
            return Err(fail(
                "page-extension must be a bare extension such as \"qmd\"".to_string(),
            ));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(fail("fetch-timeout-secs must be positive".to_string()));
        }

        Ok(())
    }

    /// Returns the per-request timeout for sketch downloads.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn has_separator(value: &str) -> bool {
    value.contains('/') || value.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();

        let settings = Settings::load(&temp.path().join("showcase.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.branches, vec!["main", "master"]);
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("showcase.toml");
        fs::write(
            &path,
            r#"
organization = "my-org"
pattern = "PROJ_"
page-template = "templates/page.hbs"
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.organization, "my-org");
        assert_eq!(settings.pattern, "PROJ_");
        assert_eq!(
            settings.page_template,
            Some(PathBuf::from("templates/page.hbs"))
        );
        assert_eq!(settings.page_extension, "qmd");
        assert_eq!(settings.sketch_file_name, "sketch.png");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("showcase.toml");
        fs::write(&path, "organisation = \"typo\"\n").unwrap();

        let result = Settings::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn validation_rejects_empty_branches() {
        let settings = Settings {
            branches: Vec::new(),
            ..Settings::default()
        };

        let result = settings.validate(Path::new("showcase.toml"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn validation_rejects_invalid_placeholder_url() {
        let settings = Settings {
            placeholder_image: "not-a-url".to_string(),
            ..Settings::default()
        };

        let result = settings.validate(Path::new("showcase.toml"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn validation_rejects_dotted_extension() {
        let settings = Settings {
            page_extension: ".qmd".to_string(),
            ..Settings::default()
        };

        let result = settings.validate(Path::new("showcase.toml"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn validation_rejects_nested_sketch_file_name() {
        let settings = Settings {
            sketch_file_name: "img/sketch.png".to_string(),
            ..Settings::default()
        };

        let result = settings.validate(Path::new("showcase.toml"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
