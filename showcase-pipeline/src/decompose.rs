//! Splitting repository names into group identifier and project name.

use crate::dataset::RepositoryRecord;
use tracing::{debug, info};

/// Number of parsed rows echoed at debug level.
const SAMPLE_ROWS: usize = 10;

/// Parses a repository name into `(group_number, project_name)`.
///
/// The remainder after `pattern` is split on its first `_`: the part before
/// it is the group, everything after it (further underscores included) is
/// the project name. Names without the prefix yield two empty strings.
///
/// ```
/// use showcase_pipeline::parse_repo_name;
///
/// assert_eq!(
///     parse_repo_name("DSCI-532_2026_12_my-project", "DSCI-532_2026_"),
///     ("12".to_string(), "my-project".to_string())
/// );
/// ```
#[must_use]
pub fn parse_repo_name(name: &str, pattern: &str) -> (String, String) {
    let Some(remainder) = name.strip_prefix(pattern) else {
        return (String::new(), String::new());
    };

    match remainder.split_once('_') {
        Some((group, project)) => (group.to_string(), project.to_string()),
        None => (remainder.to_string(), String::new()),
    }
}

/// Overwrites `group_number` and `project_name` of every record.
///
/// Returns the number of records that produced a group identifier.
pub fn decompose_records(records: &mut [RepositoryRecord], pattern: &str) -> usize {
    for record in records.iter_mut() {
        let (group_number, project_name) = parse_repo_name(&record.name, pattern);
        record.group_number = group_number;
        record.project_name = project_name;
    }

    for record in records.iter().take(SAMPLE_ROWS) {
        debug!(
            name = %record.name,
            group_number = %record.group_number,
            project_name = %record.project_name,
            "Parsed repository name"
        );
    }

    let grouped = records.iter().filter(|r| r.has_group()).count();
    info!(total = records.len(), grouped, "Parsed repository names");
    grouped
}
