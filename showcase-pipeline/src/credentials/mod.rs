//! GitHub token lookup.
//!
//! Sources are tried in a fixed order and the first non-empty value wins:
//! `GITHUB_TOKEN`, `GITHUB_PAT`, the same two keys in the base directory's
//! `.env` file, then a hidden interactive prompt.

mod error;

pub use error::CredentialError;

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable names checked, in priority order.
pub const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GITHUB_PAT"];

const PROMPT: &str = "Enter your GitHub Personal Access Token (press Enter to skip): ";

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// A process environment variable.
    Environment(&'static str),
    /// A key in the `.env` file.
    DotEnv(&'static str),
    /// The interactive prompt.
    Prompt,
}

/// Resolves the GitHub token from the configured sources.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    dotenv_path: PathBuf,
}

impl TokenResolver {
    /// Creates a resolver reading the given `.env` file as its fallback.
    pub fn new(dotenv_path: PathBuf) -> Self {
        Self { dotenv_path }
    }

    /// Resolves the token, prompting on the terminal as a last resort.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Missing`] if every source is empty.
    pub fn resolve(&self) -> Result<String, CredentialError> {
        self.resolve_with(prompt_hidden)
    }

    /// Resolves the token using `prompt` as the final source.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Missing`] if every source is empty.
    pub fn resolve_with<P>(&self, prompt: P) -> Result<String, CredentialError>
    where
        P: FnOnce() -> Option<String>,
    {
        let (token, source) = self
            .lookup(prompt)
            .ok_or_else(|| CredentialError::Missing {
                dotenv_path: self.dotenv_path.display().to_string(),
            })?;
        debug!(source = ?source, "Resolved GitHub token");
        Ok(token)
    }

    fn lookup<P>(&self, prompt: P) -> Option<(String, TokenSource)>
    where
        P: FnOnce() -> Option<String>,
    {
        for var in TOKEN_VARS {
            if let Some(token) = non_empty(std::env::var(var).ok()) {
                return Some((token, TokenSource::Environment(var)));
            }
        }

        let dotenv = read_dotenv(&self.dotenv_path);
        for var in TOKEN_VARS {
            if let Some(token) = non_empty(dotenv.get(var).cloned()) {
                return Some((token, TokenSource::DotEnv(var)));
            }
        }

        non_empty(prompt()).map(|token| (token, TokenSource::Prompt))
    }
}

/// Reads `.env` into a map without touching the process environment.
fn read_dotenv(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }

    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to open .env file");
            return HashMap::new();
        }
    };

    let mut values = HashMap::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable .env line");
            }
        }
    }
    values
}

fn prompt_hidden() -> Option<String> {
    if !std::io::stdin().is_terminal() {
        return None;
    }

    match rpassword::prompt_password(PROMPT) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!(error = %e, "Failed to read token from prompt");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
