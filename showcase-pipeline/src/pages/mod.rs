//! Quarto listing page generation.
//!
//! One page per record with a group identifier, written to
//! `<pages dir>/group-<label>.<ext>`. Existing files are overwritten.

mod error;
mod plan;
mod renderer;

pub use error::PageError;
pub use plan::{numeric_group, plan_pages, ProjectPage, NON_NUMERIC_ORDER_BASE};
pub use renderer::{create_handlebars_registry, PageRenderer, DEFAULT_PAGE_TEMPLATE};

use crate::dataset::RepositoryRecord;
use std::path::Path;
use tracing::{info, info_span};

/// Renders and writes every page, returning them in write order.
///
/// # Errors
///
/// Returns [`PageError`] if the directory or a page cannot be written, or a
/// custom template fails to render.
pub fn generate_pages(
    records: &[RepositoryRecord],
    renderer: &PageRenderer,
    output_dir: &Path,
    extension: &str,
) -> Result<Vec<ProjectPage>, PageError> {
    let _span = info_span!("pages", dir = %output_dir.display()).entered();

    std::fs::create_dir_all(output_dir).map_err(|e| PageError::IoError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let pages = plan_pages(records);
    for page in &pages {
        let content = renderer.render(page)?;
        let path = output_dir.join(page.file_name(extension));
        std::fs::write(&path, content).map_err(|e| PageError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        if !page.numeric {
            info!(group = %page.label, order = page.order, "Created page for non-numeric group");
        }
    }

    info!(count = pages.len(), "Created project pages");
    Ok(pages)
}
