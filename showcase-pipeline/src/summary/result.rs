//! Per-repository sketch outcomes.

/// Result of retrieving the sketch of a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchOutcome {
    /// The sketch was downloaded and saved.
    Saved {
        /// Repository name.
        repository: String,
        /// Branch the sketch came from.
        branch: String,
        /// Saved path relative to the base directory.
        path: String,
    },

    /// No branch served the sketch.
    Missing {
        /// Repository name.
        repository: String,
    },

    /// No request was made.
    Skipped {
        /// Repository name.
        repository: String,
        /// Reason for skipping.
        reason: String,
    },

    /// The sketch was downloaded but could not be written.
    Failed {
        /// Repository name.
        repository: String,
        /// Error message.
        error: String,
    },
}

impl SketchOutcome {
    /// Returns the saved path, if the sketch was stored.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Saved { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the repository this outcome belongs to.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Saved { repository, .. }
            | Self::Missing { repository }
            | Self::Skipped { repository, .. }
            | Self::Failed { repository, .. } => repository,
        }
    }
}
