//! Orchestrates the four pipeline stages.
//!
//! Each stage reads the whole dataset, transforms it and writes it back
//! before the next one starts.

mod config;
mod error;

pub use config::PipelineConfig;
pub use error::PipelineError;

use crate::credentials::TokenResolver;
use crate::dataset::{read_records, write_records, RepositoryRecord};
use crate::decompose::decompose_records;
use crate::discovery::discover_repositories;
use crate::pages::generate_pages;
use crate::sketches::{retrieve_sketches, HttpSketchSource, SketchSource};
use crate::stage::Stage;
use crate::summary::RunSummary;
use octocrab::Octocrab;
use tracing::{info, warn};

/// Runs pipeline stages against one [`PipelineConfig`].
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Builds a pipeline from the provided configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs `stages` in order, stopping at the first fatal error.
    ///
    /// # Errors
    ///
    /// Returns the [`PipelineError`] of the first stage that fails.
    pub async fn run(&self, stages: &[Stage]) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::new();
        for stage in stages {
            info!(stage = %stage, number = stage.number(), "Starting stage");
            match stage {
                Stage::Fetch => self.fetch(&mut summary).await?,
                Stage::Parse => self.parse(&mut summary)?,
                Stage::Sketches => self.sketches(&mut summary).await?,
                Stage::Pages => self.pages(&mut summary)?,
            }
        }
        Ok(summary)
    }

    /// Stage 1: lists the organization and saves matching repositories.
    ///
    /// # Errors
    ///
    /// Fails if no token is available, the token is rejected, the listing
    /// fails or the dataset cannot be written.
    pub async fn fetch(&self, summary: &mut RunSummary) -> Result<(), PipelineError> {
        let token = match self.config.token() {
            Some(token) => token.to_string(),
            None => TokenResolver::new(self.config.dotenv_path()).resolve()?,
        };

        let octocrab = Octocrab::builder().personal_token(token).build()?;
        let settings = self.config.settings();
        let records =
            discover_repositories(&octocrab, &settings.organization, &settings.pattern).await?;

        self.save_discovered(&records, summary)
    }

    /// Writes discovered records as a fresh dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Dataset`] if the dataset cannot be written.
    pub fn save_discovered(
        &self,
        records: &[RepositoryRecord],
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        if records.is_empty() {
            warn!(
                pattern = %self.config.settings().pattern,
                "No repositories found matching the pattern"
            );
        }

        let output = self.config.output_path();
        write_records(output, records)?;
        info!(count = records.len(), path = %output.display(), "Saved repositories");

        summary.repositories_discovered = records.len();
        summary.dataset_path = Some(output.to_path_buf());
        summary.record_stage(Stage::Fetch);
        Ok(())
    }

    /// Stage 2: fills `group_number` and `project_name`.
    ///
    /// # Errors
    ///
    /// Fails if the dataset is missing or cannot be written.
    pub fn parse(&self, summary: &mut RunSummary) -> Result<(), PipelineError> {
        let mut records = self.load(Stage::Parse)?;

        let grouped = decompose_records(&mut records, &self.config.settings().pattern);

        let output = self.config.output_path();
        write_records(output, &records)?;
        info!(path = %output.display(), "Saved parsed repositories");

        summary.names_grouped = grouped;
        summary.dataset_path = Some(output.to_path_buf());
        summary.record_stage(Stage::Parse);
        Ok(())
    }

    /// Stage 3: downloads sketches over HTTP.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the dataset is missing or
    /// cannot be written. Individual downloads never fail the stage.
    pub async fn sketches(&self, summary: &mut RunSummary) -> Result<(), PipelineError> {
        let source = HttpSketchSource::new(self.config.settings().fetch_timeout())?;
        self.sketches_with(&source, summary).await
    }

    /// Stage 3 with a caller-provided sketch source.
    ///
    /// # Errors
    ///
    /// Fails if the dataset is missing or cannot be written.
    pub async fn sketches_with<S: SketchSource>(
        &self,
        source: &S,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        let mut records = self.load(Stage::Sketches)?;

        let layout = self.config.sketch_layout();
        let outcomes = retrieve_sketches(&mut records, source, &layout).await;

        let output = self.config.output_path();
        write_records(output, &records)?;
        info!(path = %output.display(), "Saved sketch paths");

        for outcome in &outcomes {
            summary.record_sketch(outcome);
        }
        summary.dataset_path = Some(output.to_path_buf());
        summary.record_stage(Stage::Sketches);
        Ok(())
    }

    /// Reads the dataset `stage` consumes.
    fn load(&self, stage: Stage) -> Result<Vec<RepositoryRecord>, PipelineError> {
        let input = self.config.dataset_path();
        let records = read_records(input, stage)?;
        info!(count = records.len(), path = %input.display(), "Loaded repositories");
        Ok(records)
    }

    /// Stage 4: renders one listing page per grouped record.
    ///
    /// # Errors
    ///
    /// Fails if the dataset is missing, the template cannot be loaded or
    /// rendered, or a page cannot be written.
    pub fn pages(&self, summary: &mut RunSummary) -> Result<(), PipelineError> {
        let records = self.load(Stage::Pages)?;

        let renderer = self.config.page_renderer()?;
        let pages_dir = self.config.pages_dir();
        let pages = generate_pages(
            &records,
            &renderer,
            &pages_dir,
            &self.config.settings().page_extension,
        )?;

        summary.record_pages(&pages);
        summary.pages_dir = Some(pages_dir);
        summary.record_stage(Stage::Pages);
        Ok(())
    }
}
