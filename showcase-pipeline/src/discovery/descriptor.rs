//! Listing entries as seen by discovery.

use crate::dataset::RepositoryRecord;
use octocrab::models::Repository;

/// The fields discovery keeps from a listed repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Canonical GitHub URL.
    pub html_url: String,

    /// Description, if the repository has one.
    pub description: Option<String>,

    /// Creation timestamp (RFC 3339).
    pub created_at: Option<String>,

    /// Last update timestamp (RFC 3339).
    pub updated_at: Option<String>,

    /// Whether the repository is private.
    pub private: bool,
}

impl RepositoryDescriptor {
    /// Extracts a descriptor from an API model.
    ///
    /// A missing `full_name` is rebuilt from `organization` and the name.
    pub fn from_model(repo: &Repository, organization: &str) -> Self {
        Self {
            name: repo.name.clone(),
            full_name: repo
                .full_name
                .clone()
                .unwrap_or_else(|| format!("{}/{}", organization, repo.name)),
            html_url: repo
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            description: repo.description.clone(),
            created_at: repo.created_at.map(|t| t.to_rfc3339()),
            updated_at: repo.updated_at.map(|t| t.to_rfc3339()),
            private: repo.private.unwrap_or(false),
        }
    }

    /// Converts into a dataset row with empty derived columns.
    pub fn into_record(self) -> RepositoryRecord {
        RepositoryRecord {
            name: self.name,
            full_name: self.full_name,
            html_url: self.html_url,
            description: self.description.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
            private: self.private,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_become_empty_strings() {
        let record = RepositoryDescriptor {
            name: "repo".to_string(),
            full_name: "org/repo".to_string(),
            html_url: "https://github.com/org/repo".to_string(),
            description: None,
            created_at: None,
            updated_at: Some("2026-01-05T10:00:00+00:00".to_string()),
            private: true,
        }
        .into_record();

        assert_eq!(record.description, "");
        assert_eq!(record.created_at, "");
        assert_eq!(record.updated_at, "2026-01-05T10:00:00+00:00");
        assert!(record.private);
        assert!(!record.has_group());
    }
}
