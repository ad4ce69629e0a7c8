//! The row type flowing between stages.

use serde::{Deserialize, Deserializer, Serialize};

/// One discovered repository and everything later stages derive from it.
///
/// Nullable fields are plain strings defaulting to empty, so columns missing
/// from an older dataset load as empty instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name, unique within a run.
    pub name: String,

    /// Full repository name in "owner/name" format.
    #[serde(default)]
    pub full_name: String,

    /// Canonical GitHub URL.
    #[serde(default)]
    pub html_url: String,

    /// Repository description.
    #[serde(default)]
    pub description: String,

    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: String,

    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: String,

    /// Whether the repository is private.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub private: bool,

    /// Group identifier parsed from the name.
    #[serde(default)]
    pub group_number: String,

    /// Project name parsed from the name.
    #[serde(default)]
    pub project_name: String,

    /// Downloaded sketch, relative to the base directory.
    #[serde(default)]
    pub sketch_path: String,
}

impl RepositoryRecord {
    /// Column order of the dataset file.
    pub const COLUMNS: [&'static str; 10] = [
        "name",
        "full_name",
        "html_url",
        "description",
        "created_at",
        "updated_at",
        "private",
        "group_number",
        "project_name",
        "sketch_path",
    ];

    /// Returns true if name decomposition produced a group identifier.
    #[must_use]
    pub fn has_group(&self) -> bool {
        !self.group_number.is_empty()
    }
}

/// Accepts `true`/`false` in any case plus `1`/`0` and empty cells.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, found '{other}'"
        ))),
    }
}
