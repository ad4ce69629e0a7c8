//! Run summary types.

use super::result::SketchOutcome;
use crate::pages::ProjectPage;
use crate::stage::Stage;
use std::path::PathBuf;

/// Summary of the stages executed in one invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Stages that ran, in order.
    pub stages: Vec<Stage>,

    /// Dataset file written by the last stage.
    pub dataset_path: Option<PathBuf>,

    /// Number of repositories matching the prefix.
    pub repositories_discovered: usize,

    /// Number of records whose name yielded a group number.
    pub names_grouped: usize,

    /// Number of records seen by sketch retrieval.
    pub sketches_processed: usize,

    /// Number of sketches saved.
    pub sketches_downloaded: usize,

    /// Number of grouped records with no sketch on any branch.
    pub sketches_missing: usize,

    /// Number of records skipped without a request.
    pub sketches_skipped: usize,

    /// Number of sketches that could not be written.
    pub sketches_failed: usize,

    /// Repositories whose sketch was fetched but could not be written.
    pub failed_repositories: Vec<String>,

    /// Number of pages for numeric groups.
    pub pages_numeric: usize,

    /// Number of pages for non-numeric groups.
    pub pages_non_numeric: usize,

    /// Directory the pages were written to.
    pub pages_dir: Option<PathBuf>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a stage as executed.
    pub fn record_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Returns true if `stage` ran in this invocation.
    #[must_use]
    pub fn ran(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Updates the summary with a sketch outcome.
    pub fn record_sketch(&mut self, outcome: &SketchOutcome) {
        self.sketches_processed += 1;
        match outcome {
            SketchOutcome::Saved { .. } => self.sketches_downloaded += 1,
            SketchOutcome::Missing { .. } => self.sketches_missing += 1,
            SketchOutcome::Skipped { .. } => self.sketches_skipped += 1,
            SketchOutcome::Failed { .. } => {
                self.sketches_failed += 1;
                self.failed_repositories.push(outcome.repository().to_string());
            }
        }
    }

    /// Updates the summary with the generated pages.
    pub fn record_pages(&mut self, pages: &[ProjectPage]) {
        for page in pages {
            if page.numeric {
                self.pages_numeric += 1;
            } else {
                self.pages_non_numeric += 1;
            }
        }
    }

    /// Returns the total number of pages written.
    #[must_use]
    pub fn pages_created(&self) -> usize {
        self.pages_numeric + self.pages_non_numeric
    }
}
