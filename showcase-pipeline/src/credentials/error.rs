//! Credential resolution error types.

use thiserror::Error;

/// Errors that can occur while resolving the GitHub token.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Every source was empty.
    #[error(
        "No GitHub token provided. Set GITHUB_TOKEN or GITHUB_PAT in the environment \
         or in {dotenv_path}, or enter one at the prompt"
    )]
    Missing { dotenv_path: String },
}
