//! Pipeline error types.

/// Fatal errors that abort a stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// No usable GitHub token.
    #[error(transparent)]
    Credential(#[from] crate::credentials::CredentialError),

    /// Missing or unreadable dataset.
    #[error(transparent)]
    Dataset(#[from] crate::dataset::DatasetError),

    /// Repository listing failures.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// HTTP client initialization errors.
    #[error(transparent)]
    Fetch(#[from] crate::sketches::FetchError),

    /// Page rendering or writing errors.
    #[error(transparent)]
    Page(#[from] crate::pages::PageError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
