//! Repository discovery error types.

use thiserror::Error;

/// Errors that can occur during repository discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The token was rejected before the listing started.
    #[error(
        "GitHub rejected the token (HTTP 401); \
         check GITHUB_TOKEN, GITHUB_PAT or the .env file"
    )]
    InvalidCredential,
}
