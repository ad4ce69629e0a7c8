//! Pipeline configuration.

use crate::config::{ConfigError, Settings, SETTINGS_FILE_NAME};
use crate::pages::{PageError, PageRenderer};
use crate::sketches::SketchLayout;
use std::path::{Path, PathBuf};

/// Dataset location relative to the base directory.
const DATASET_FILE: &str = "data/repos.csv";

/// Sketch storage root relative to the base directory.
const GROUP_DATA_DIR: &str = "group_data";

/// Page output directory relative to the base directory.
const PAGES_DIR: &str = "projects";

/// Credential fallback file relative to the base directory.
const DOTENV_FILE: &str = ".env";

/// Everything a run needs, built once at startup and passed to each stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root all data, sketch and page paths derive from.
    base_dir: PathBuf,
    /// Settings from `showcase.toml` merged with CLI overrides.
    settings: Settings,
    /// Explicit GitHub token; resolved from the environment when absent.
    token: Option<String>,
    /// Dataset read by each stage.
    dataset_path: PathBuf,
    /// Dataset written by each stage, if different from `dataset_path`.
    output_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Creates a configuration rooted at `base_dir`.
    pub fn new(base_dir: PathBuf, settings: Settings) -> Self {
        let dataset_path = base_dir.join(DATASET_FILE);
        Self {
            base_dir,
            settings,
            token: None,
            dataset_path,
            output_path: None,
        }
    }

    /// Loads settings from `settings_path`, or `<base_dir>/showcase.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the settings file is unreadable or invalid.
    pub fn load(base_dir: PathBuf, settings_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let settings_path = settings_path.unwrap_or_else(|| base_dir.join(SETTINGS_FILE_NAME));
        let settings = Settings::load(&settings_path)?;
        Ok(Self::new(base_dir, settings))
    }

    /// Overrides the organization to list.
    pub fn with_organization(mut self, organization: String) -> Self {
        self.settings.organization = organization;
        self
    }

    /// Overrides the repository name prefix.
    pub fn with_pattern(mut self, pattern: String) -> Self {
        self.settings.pattern = pattern;
        self
    }

    /// Sets an explicit GitHub token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Reads the dataset from a custom path.
    pub fn with_dataset_path(mut self, dataset_path: PathBuf) -> Self {
        self.dataset_path = dataset_path;
        self
    }

    /// Writes the dataset to a distinct path instead of overwriting the input.
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = Some(output_path);
        self
    }

    /// Returns the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the effective settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the explicit token, if one was given.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the dataset each stage reads.
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Returns the dataset each stage writes.
    pub fn output_path(&self) -> &Path {
        self.output_path.as_deref().unwrap_or(&self.dataset_path)
    }

    /// Returns the directory pages are written to.
    pub fn pages_dir(&self) -> PathBuf {
        self.base_dir.join(PAGES_DIR)
    }

    /// Returns the `.env` file consulted for the token.
    pub fn dotenv_path(&self) -> PathBuf {
        self.base_dir.join(DOTENV_FILE)
    }

    /// Returns where sketches are fetched from and stored.
    pub fn sketch_layout(&self) -> SketchLayout {
        SketchLayout {
            base_dir: self.base_dir.clone(),
            group_data_dir: PathBuf::from(GROUP_DATA_DIR),
            raw_host: self.settings.raw_host.clone(),
            branches: self.settings.branches.clone(),
            sketch_path: self.settings.sketch_path.clone(),
            file_name: self.settings.sketch_file_name.clone(),
        }
    }

    /// Builds the page renderer, loading a custom template if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::IoError`] if the custom template cannot be read.
    pub fn page_renderer(&self) -> Result<PageRenderer, PageError> {
        let placeholder = self.settings.placeholder_image.clone();
        let Some(template_path) = &self.settings.page_template else {
            return Ok(PageRenderer::new(placeholder));
        };

        let path = self.base_dir.join(template_path);
        let template = std::fs::read_to_string(&path).map_err(|e| PageError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(PageRenderer::with_template(template, placeholder))
    }
}
