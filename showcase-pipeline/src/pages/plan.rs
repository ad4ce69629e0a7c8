//! Deciding which pages exist and how they are ordered.

use crate::dataset::RepositoryRecord;

/// First sort order handed to non-numeric groups.
pub const NON_NUMERIC_ORDER_BASE: i64 = 9000;

/// One listing page, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPage {
    /// Group label used in the title and file name.
    pub label: String,

    /// Project name shown as subtitle.
    pub project_name: String,

    /// Repository description.
    pub description: String,

    /// Repository URL for the link button.
    pub html_url: String,

    /// Sketch path relative to the base directory, empty if none.
    pub sketch_path: String,

    /// Position in the listing.
    pub order: i64,

    /// Whether the group identifier was read as a number.
    pub numeric: bool,
}

impl ProjectPage {
    fn new(record: &RepositoryRecord, label: String, order: i64, numeric: bool) -> Self {
        Self {
            label,
            project_name: record.project_name.clone(),
            description: record.description.clone(),
            html_url: record.html_url.clone(),
            sketch_path: record.sketch_path.clone(),
            order,
            numeric,
        }
    }

    /// Returns the page file name, e.g. `group-12.qmd`.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("group-{}.{}", self.label, extension)
    }

    /// Returns the card description: the repository description, a blank
    /// line, then the repo link button. Continuation lines are indented for
    /// a YAML block scalar.
    #[must_use]
    pub fn description_block(&self) -> String {
        let link = format!("[Repo]({}){{.btn .btn-primary .btn-sm}}", self.html_url);

        let mut lines: Vec<&str> = Vec::new();
        if !self.description.is_empty() {
            lines.extend(self.description.lines());
            lines.push("");
        }
        lines.push(&link);

        lines.join("\n  ")
    }

    /// Returns the image reference relative to the pages directory.
    #[must_use]
    pub fn image(&self, placeholder: &str) -> String {
        if self.sketch_path.is_empty() {
            placeholder.to_string()
        } else {
            format!("../{}", self.sketch_path)
        }
    }
}

/// Interprets a group identifier as a number the way the listing expects:
/// parse as floating point, then truncate toward zero.
///
/// `"12"` gives 12, `"007"` gives 7 and `"3.9"` gives 3; anything that is
/// not a finite number in `i64` range gives `None`.
#[must_use]
pub fn numeric_group(group: &str) -> Option<i64> {
    let value: f64 = group.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Builds the pages for all records with a group identifier.
///
/// Numeric groups come first, in input order, ordered by their value.
/// Non-numeric groups follow, sorted by their raw identifier and numbered
/// from [`NON_NUMERIC_ORDER_BASE`].
#[must_use]
pub fn plan_pages(records: &[RepositoryRecord]) -> Vec<ProjectPage> {
    let mut pages = Vec::new();
    let mut deferred = Vec::new();

    for record in records.iter().filter(|r| r.has_group()) {
        match numeric_group(&record.group_number) {
            Some(value) => pages.push(ProjectPage::new(record, value.to_string(), value, true)),
            None => deferred.push(record),
        }
    }

    deferred.sort_by(|a, b| a.group_number.cmp(&b.group_number));
    for (position, record) in deferred.into_iter().enumerate() {
        let order = NON_NUMERIC_ORDER_BASE + position as i64;
        pages.push(ProjectPage::new(record, record.group_number.clone(), order, false));
    }

    pages
}
